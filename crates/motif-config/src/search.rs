//! Search endpoint configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_endpoint() -> String {
    "http://localhost:8000/api/search".to_string()
}

/// Result-count hint sent with every search.
const fn default_top_k() -> u32 {
    9
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// URL the search request is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// `top_k` sent in the request body.
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            top_k: default_top_k(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the values a search client cannot work without.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a non-HTTP endpoint or a zero
    /// `top_k`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "search.endpoint".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.endpoint),
            });
        }
        if self.top_k == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.top_k".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = SearchConfig::default();
        assert_eq!(config.endpoint, "http://localhost:8000/api/search");
        assert_eq!(config.top_k, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let config = SearchConfig {
            endpoint: "ftp://example.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "search.endpoint"
        ));
    }

    #[test]
    fn rejects_zero_top_k() {
        let config = SearchConfig {
            top_k: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
