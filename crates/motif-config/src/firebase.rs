//! Hosted document store (Firestore) configuration.

use serde::{Deserialize, Serialize};

fn default_endpoint() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_users_collection() -> String {
    "users".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FirebaseConfig {
    /// Firebase project id.
    #[serde(default)]
    pub project_id: String,

    /// Web API key, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,

    /// Firestore database id.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection holding one profile document per user.
    #[serde(default = "default_users_collection")]
    pub users_collection: String,

    /// REST API base. Overridable for emulators and tests.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            database: default_database(),
            users_collection: default_users_collection(),
            endpoint: default_endpoint(),
        }
    }
}

impl FirebaseConfig {
    /// Check if the Firebase config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.project_id.is_empty() && !self.api_key.is_empty()
    }

    /// Resource name of the documents root, e.g.
    /// `projects/motif/databases/(default)/documents`.
    #[must_use]
    pub fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.project_id, self.database
        )
    }

    /// Full REST URL of the documents root.
    #[must_use]
    pub fn documents_url(&self) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.documents_root()
        )
    }
}
