//! Administrator user model held in the session.

use serde::{Deserialize, Serialize};

use schooladmin_core::types::{SchoolId, UserId};

use super::role::UserRole;

/// The signed-in administrator, as persisted in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend account id.
    pub id: UserId,
    /// Registered mobile number; empty when the backend omits it.
    #[serde(default)]
    pub mobile_number: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email; empty when unknown.
    #[serde(default)]
    pub email: String,
    /// Always the school administrator role.
    #[serde(default)]
    pub role: UserRole,
    /// School this administrator manages.
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    /// The password is still the initial, administrator-issued one.
    #[serde(default)]
    pub is_first_login: bool,
}

impl User {
    /// Copy of this user with the first-login flag cleared.
    pub fn with_password_reset(&self) -> Self {
        Self {
            is_first_login: false,
            ..self.clone()
        }
    }
}
