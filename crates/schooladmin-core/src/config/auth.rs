//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Client-side authentication rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Minimum length for the first-login password reset.
    #[serde(default = "default_reset_min")]
    pub reset_password_min_length: usize,
    /// Minimum length for a password change from account settings.
    #[serde(default = "default_change_min")]
    pub change_password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            reset_password_min_length: default_reset_min(),
            change_password_min_length: default_change_min(),
        }
    }
}

fn default_reset_min() -> usize {
    8
}

fn default_change_min() -> usize {
    6
}
