//! Shared HTTP response helpers for the search client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success → [`SearchError::Api`]) so the client stays focused
//! on request construction and response mapping.

use crate::error::SearchError;

/// Longest response body quoted verbatim in an error message.
const MAX_BODY_IN_MESSAGE: usize = 200;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`SearchError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** → [`SearchError::Api`] with the status code and
///   a short message (body if short, else the canonical reason).
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SearchError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = parse_retry_after(&resp);
        return Err(SearchError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let body = body.trim();
        let message = if body.is_empty() || body.len() > MAX_BODY_IN_MESSAGE {
            status.canonical_reason().unwrap_or("unknown status").to_string()
        } else {
            body.to_string()
        };
        return Err(SearchError::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
