pub mod auth;
pub mod contexts;
pub mod dispatch;
pub mod saved;
pub mod search;
pub mod shared;
pub mod tag;
