//! Search error types.

use thiserror::Error;

/// Errors from talking to the search endpoint.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the endpoint.
        status: u16,
        /// Canonical reason phrase, or the response body when it is short.
        message: String,
    },

    /// The search endpoint returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The response body was not one of the supported shapes.
    #[error("parse error: {0}")]
    Parse(String),
}
