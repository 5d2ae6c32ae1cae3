//! General application configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default toast lifetime in seconds.
const fn default_toast_secs() -> u64 {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// How long a toast notification stays visible.
    #[serde(default = "default_toast_secs")]
    pub toast_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            toast_secs: default_toast_secs(),
        }
    }
}

impl GeneralConfig {
    #[must_use]
    pub const fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.toast_secs)
    }
}
