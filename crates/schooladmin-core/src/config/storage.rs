//! Local session persistence configuration.

use serde::{Deserialize, Serialize};

/// Where the session key-value document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the JSON document holding token, user, and preferences.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            session_file: default_session_file(),
        }
    }
}

fn default_session_file() -> String {
    "data/session.json".to_string()
}
