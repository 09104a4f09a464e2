//! Session lifecycle phases.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the client session currently stands.
///
/// ```text
/// Loading -> Anonymous -> Authenticating -> Authenticated
///                               |                 ^
///                               v                 | reset
///                       PasswordResetPending -----+
/// ```
///
/// Logout returns to `Anonymous` from any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// The persisted session has not been read yet.
    Loading,
    /// No token or user.
    Anonymous,
    /// A login request is in flight.
    Authenticating,
    /// Signed in with a permanent password.
    Authenticated,
    /// Signed in, but the initial password must be changed first.
    PasswordResetPending,
}

impl SessionPhase {
    /// Whether a token and user are held in this phase.
    pub fn has_session(&self) -> bool {
        matches!(self, Self::Authenticated | Self::PasswordResetPending)
    }

    /// Whether the dashboard and management screens may be used.
    pub fn can_use_dashboard(&self) -> bool {
        matches!(self, Self::Authenticated)
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Loading => "loading",
            Self::Anonymous => "anonymous",
            Self::Authenticating => "authenticating",
            Self::Authenticated => "authenticated",
            Self::PasswordResetPending => "password_reset_pending",
        };
        write!(f, "{label}")
    }
}
