//! Cross-cutting error types for Motif.
//!
//! Transport and persistence errors (`SearchError`, `ProfileError`, ...) live in
//! their respective crates. A unified error is deferred to `motif-cli`, where
//! all crate errors converge into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Motif crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A result without a stable identifier was offered for persistence.
    #[error("Result '{title}' is unverified and cannot be saved")]
    Unverified { title: String },

    /// Data failed validation (unknown enum value, bad identifier, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
