//! Backend authentication calls and their mapping into the session model.

use serde_json::Value;
use tracing::{info, warn};

use schooladmin_core::error::{AppError, ErrorKind};
use schooladmin_core::result::AppResult;
use schooladmin_entity::session::NavigationTarget;
use schooladmin_entity::user::{
    LoginPayload, LoginResponse, MessageResponse, ProfileResponse, ProfileUpdate, User,
};
use schooladmin_http::ApiClient;

use super::store::SessionStore;

/// Message shown when a non-administrator account signs in.
pub const UNAUTHORIZED_ROLE_MESSAGE: &str =
    "Unauthorized. This portal is for School Administrators only.";
/// Fallback confirmation for a password change.
pub const PASSWORD_CHANGED_MESSAGE: &str = "Password changed successfully";
/// Fallback confirmation for a profile update.
pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";

/// Translates login, password, and profile intents into backend calls.
#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
    store: SessionStore,
}

impl AuthService {
    /// Creates an auth service.
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Authenticate and return the token and mapped user. Nothing is
    /// persisted here.
    ///
    /// The identifier is sent as typed; surrounding whitespace makes it a
    /// username. The role is checked before the rest of the body is mapped.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<(String, User)> {
        if identifier.trim().is_empty() {
            return Err(AppError::validation(
                "Please enter a valid username or mobile number",
            ));
        }
        if password.is_empty() {
            return Err(AppError::validation("Please enter your password"));
        }

        let payload = LoginPayload::new(identifier, password);
        let body: Value = self.api.post("/auth/login", &payload).await?;

        if LoginResponse::role_in(&body).is_none() {
            warn!(role = ?body.get("role"), "Rejected login for non-administrator role");
            return Err(AppError::authorization(UNAUTHORIZED_ROLE_MESSAGE));
        }

        let response: LoginResponse = serde_json::from_value(body).map_err(|e| {
            AppError::with_source(
                ErrorKind::Serialization,
                format!("Unexpected response from /auth/login: {e}"),
                e,
            )
        })?;
        let (token, user) = response.into_parts();
        info!(user_id = %user.id, first_login = user.is_first_login, "Login accepted");
        Ok((token, user))
    }

    /// Change the password, proving the current one. Returns the backend's
    /// confirmation message.
    pub async fn reset_password(&self, new_password: &str, current_password: &str) -> AppResult<String> {
        let body = serde_json::json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        });
        let response: MessageResponse = self.api.post("/auth/change-password", &body).await?;
        Ok(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| PASSWORD_CHANGED_MESSAGE.to_string()))
    }

    /// Send a partial profile update. Returns the backend's message.
    pub async fn update_profile(&self, fields: &ProfileUpdate) -> AppResult<String> {
        let response: ProfileResponse = self.api.put("/auth/profile", fields).await?;
        Ok(response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| PROFILE_UPDATED_MESSAGE.to_string()))
    }

    /// Remove every persisted session key. The caller must return to login.
    pub async fn logout(&self) -> AppResult<NavigationTarget> {
        self.store.clear().await?;
        info!("Session cleared");
        Ok(NavigationTarget::Login)
    }
}
