//! # motif-core
//!
//! Core types, the decoration engine, and observable state containers for Motif.
//!
//! This crate provides the foundational pieces shared across all Motif crates:
//! - Entity structs for search results, saved items, and session users
//! - Context-filter, list, and phase enums with state machine transitions
//! - The deterministic pseudo-random generator and the decoration engine
//! - `Observable`, the watch-backed state container every store is built on
//! - The single-slot toast notification store
//! - Cross-cutting error types

pub mod decorate;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod observable;
pub mod rng;
pub mod toast;

pub use decorate::decorate;
pub use errors::CoreError;
pub use observable::Observable;
pub use toast::ToastStore;
