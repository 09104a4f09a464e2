//! Backend API connection configuration.

use serde::{Deserialize, Serialize};

/// Settings for reaching the school administration REST backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL including the API prefix, e.g. `https://api.example.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. This is the only timeout the client applies.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Value of the `User-Agent` header.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("schooladmin/{}", env!("CARGO_PKG_VERSION"))
}
