//! Login request and response payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use schooladmin_core::types::{SchoolId, UserId};

use super::model::User;
use super::role::UserRole;

/// Display name used when the backend sends no username.
pub const DEFAULT_DISPLAY_NAME: &str = "School Admin";

/// Body of `POST /auth/login`. Exactly one identifier field is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoginPayload {
    /// Identifier is a ten-digit mobile number.
    Mobile {
        /// Ten ASCII digits.
        #[serde(rename = "mobileNumber")]
        mobile_number: String,
        /// Plaintext password.
        password: String,
    },
    /// Any other identifier is treated as a username.
    Username {
        /// Free-form login name.
        username: String,
        /// Plaintext password.
        password: String,
    },
}

impl LoginPayload {
    /// Choose the identifier field: `mobileNumber` for exactly ten ASCII
    /// digits, `username` otherwise.
    pub fn new(identifier: &str, password: &str) -> Self {
        if is_mobile_number(identifier) {
            Self::Mobile {
                mobile_number: identifier.to_string(),
                password: password.to_string(),
            }
        } else {
            Self::Username {
                username: identifier.to_string(),
                password: password.to_string(),
            }
        }
    }
}

/// `^\d{10}$` over ASCII digits.
pub fn is_mobile_number(identifier: &str) -> bool {
    identifier.len() == 10 && identifier.bytes().all(|b| b.is_ascii_digit())
}

/// Body returned by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Account id.
    pub id: UserId,
    /// Registered mobile number.
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// Login name, used as the display name.
    #[serde(default)]
    pub username: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Backend role string.
    #[serde(default)]
    pub role: Option<String>,
    /// School managed by this account.
    #[serde(default)]
    pub school_id: Option<SchoolId>,
    /// The account still uses its initial password.
    #[serde(default)]
    pub require_password_reset: Option<bool>,
}

impl LoginResponse {
    /// Role read straight from a raw login body, before any other field is
    /// required to be well formed.
    pub fn role_in(body: &Value) -> Option<UserRole> {
        body.get("role")
            .and_then(Value::as_str)
            .and_then(UserRole::from_wire)
    }

    /// Split into the access token and the internal user model.
    ///
    /// Defaults: empty strings become absent, `name` falls back to
    /// [`DEFAULT_DISPLAY_NAME`], `email` and `mobile_number` to `""`, and
    /// `is_first_login` to `false`.
    pub fn into_parts(self) -> (String, User) {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        let user = User {
            id: self.id,
            mobile_number: non_empty(self.mobile_number).unwrap_or_default(),
            name: non_empty(self.username).unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string()),
            email: non_empty(self.email).unwrap_or_default(),
            role: UserRole::SchoolAdmin,
            school_id: self.school_id,
            is_first_login: self.require_password_reset.unwrap_or(false),
        };
        (self.access_token, user)
    }
}

/// Body returned by `POST /auth/change-password`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body returned by `PUT /auth/profile`. The echoed `user` is not in the
/// session shape, so only the message is read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileResponse {
    /// Human-readable confirmation.
    #[serde(default)]
    pub message: Option<String>,
}
