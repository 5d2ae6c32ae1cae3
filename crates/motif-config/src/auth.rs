//! Browser sign-in configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_callback_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Hosted sign-in page. It must redirect to the `redirect_url` query
    /// parameter with `id_token` and `state` appended.
    #[serde(default)]
    pub sign_in_url: String,

    /// How long to wait for the browser callback, in seconds.
    #[serde(default = "default_callback_timeout_secs")]
    pub callback_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            sign_in_url: String::new(),
            callback_timeout_secs: default_callback_timeout_secs(),
        }
    }
}

impl AuthConfig {
    pub fn is_configured(&self) -> bool {
        !self.sign_in_url.is_empty()
    }

    #[must_use]
    pub const fn callback_timeout(&self) -> Duration {
        Duration::from_secs(self.callback_timeout_secs)
    }
}
