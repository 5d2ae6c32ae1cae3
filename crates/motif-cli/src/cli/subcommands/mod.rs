pub mod auth;
pub mod saved;

pub use auth::AuthCommands;
pub use saved::{SavedAddArgs, SavedCommands, SavedListArgs, SavedRemoveArgs};
