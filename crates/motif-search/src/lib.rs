//! # motif-search
//!
//! Search endpoint client and the search interaction store for Motif.
//!
//! - [`HttpSearchClient`] POSTs `{query, top_k}` to the configured endpoint
//!   and accepts either a bare result array or `{results: [...]}`.
//! - [`SearchStore`] composes the outbound query from free text plus active
//!   context filters, decorates each result, and publishes the session state.

pub mod client;
pub mod error;
pub mod http;
pub mod response;
pub mod store;

pub use client::{HttpSearchClient, SearchBackend, SearchRequest};
pub use error::SearchError;
pub use store::{SearchOutcome, SearchState, SearchStore};
