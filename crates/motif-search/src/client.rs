//! Search endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;
use crate::http::check_response;
use crate::response::parse_results;

/// Body of a search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: u32,
}

/// Anything that can answer a search request with raw result items.
///
/// Items are returned undecoded; the store decodes and decorates each one
/// independently.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>, SearchError>;
}

/// HTTP client for the remote search endpoint.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpSearchClient {
    /// Create a client that POSTs to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client` fails
    /// to build.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("motif/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>, SearchError> {
        tracing::debug!(endpoint = %self.endpoint, query = %request.query, top_k = request.top_k, "search request");
        let resp = check_response(self.http.post(&self.endpoint).json(request).send().await?).await?;
        let body = resp.bytes().await?;
        let items = parse_results(&body)?;
        tracing::debug!(count = items.len(), "search response");
        Ok(items)
    }
}
