//! Error types for motif-profile.

use motif_auth::AuthError;
use motif_core::CoreError;
use thiserror::Error;

/// Errors from the remote document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("document store error ({status}): {message}")]
    Api { status: u16, message: String },

    /// An update targeted a document that does not exist.
    #[error("document not found: {path}")]
    NotFound { path: String },

    /// A create targeted a document that already exists.
    #[error("document already exists: {path}")]
    AlreadyExists { path: String },

    /// A record could not be encoded for writing.
    #[error("encode error: {0}")]
    Encode(String),

    /// A stored document could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
}

/// Errors from the session/profile store.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Core(#[from] CoreError),

    /// The operation needs a signed-in user.
    #[error("not signed in")]
    NotSignedIn,

    /// `init` was called more than once.
    #[error("session store already initialized")]
    AlreadyInitialized,

    /// An operation ran before `init`.
    #[error("session store not initialized; call init() first")]
    NotInitialized,
}
