//! Response-shape adapter for the search endpoint.
//!
//! Deployed backends answer either with a bare JSON array of results or with
//! an object carrying the array under `results` (older builds used `movies`).
//! Both are accepted; items stay as raw JSON so that one malformed item can be
//! dropped later without failing the whole response.

use serde::Deserialize;
use serde_json::Value;

use crate::error::SearchError;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Bare(Vec<Value>),
    Wrapped {
        #[serde(alias = "movies")]
        results: Vec<Value>,
    },
}

/// Extract the ordered result items from a response body.
///
/// # Errors
///
/// Returns [`SearchError::Parse`] if the body is not JSON, or is JSON of
/// neither supported shape.
pub fn parse_results(body: &[u8]) -> Result<Vec<Value>, SearchError> {
    let response: SearchResponse = serde_json::from_slice(body).map_err(|e| {
        SearchError::Parse(format!(
            "expected a result array or an object with `results`: {e}"
        ))
    })?;
    Ok(match response {
        SearchResponse::Bare(items) | SearchResponse::Wrapped { results: items } => items,
    })
}
