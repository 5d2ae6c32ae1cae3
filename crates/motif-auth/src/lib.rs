//! # motif-auth
//!
//! Authentication for Motif.
//!
//! Provides the [`AuthProvider`] seam the session store subscribes to, a
//! browser sign-in flow (`tiny_http` loopback callback + `open`), ID-token
//! claim decoding, and OS keychain credential storage (`keyring`, with a file
//! fallback).

pub mod browser_flow;
pub mod claims;
pub mod error;
pub mod provider;
pub mod token_store;

pub use claims::IdTokenClaims;
pub use error::AuthError;
pub use provider::{AuthProvider, AuthUser, BrowserAuthProvider, StaticAuthProvider};

/// The stored ID token and where it came from, without validation.
#[must_use]
pub fn resolve_token() -> Option<(String, token_store::TokenSource)> {
    token_store::load()
}
