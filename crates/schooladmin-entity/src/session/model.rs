//! Persisted session values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::user::User;

use super::phase::SessionPhase;

/// Token and user as last written to the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    /// Bearer token.
    pub token: String,
    /// Signed-in administrator.
    pub user: User,
}

/// The login password retained until the first-login reset completes.
///
/// The change-password endpoint requires the current password, so it is
/// kept in plaintext for that single call. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TempPassword(String);

impl TempPassword {
    /// Wrap a plaintext password.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// The plaintext value, for the change-password request only.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TempPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TempPassword(***)")
    }
}

/// Read-only view of the session handed to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: SessionPhase,
    /// Bearer token, when signed in.
    pub token: Option<String>,
    /// Signed-in user, when signed in.
    pub user: Option<User>,
    /// Whether a first-login password is being retained.
    pub holds_temp_password: bool,
}

impl SessionSnapshot {
    /// Holds iff both token and user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

/// Where the caller must send the operator after an auth transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// The login entry point; all in-memory state is gone.
    Login,
    /// The first-login password reset screen.
    ResetPassword,
    /// The main dashboard.
    Dashboard,
}

impl NavigationTarget {
    /// Destination after a successful login.
    pub fn after_login(user: &User) -> Self {
        if user.is_first_login {
            Self::ResetPassword
        } else {
            Self::Dashboard
        }
    }
}
