//! Session storage operations over the durable key-value store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{KeyValueStore, TokenProvider};
use schooladmin_entity::session::{StoredSession, TempPassword};
use schooladmin_entity::user::User;

/// Key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the JSON-encoded user.
pub const USER_KEY: &str = "user";
/// Key holding the first-login password.
pub const TEMP_PASSWORD_KEY: &str = "tempPassword";

/// Reads and writes the persisted session.
///
/// Reads never fail: a missing, unreadable, or corrupt value reads as absent.
#[derive(Debug, Clone)]
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Creates a session store over `kv`.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// The underlying key-value store.
    pub fn kv(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.kv)
    }

    /// Write token and user, replacing any prior session.
    pub async fn save(&self, token: &str, user: &User) -> AppResult<()> {
        self.kv.set(TOKEN_KEY, token).await?;
        self.save_user(user).await
    }

    /// Replace the stored user.
    pub async fn save_user(&self, user: &User) -> AppResult<()> {
        let json = serde_json::to_string(user)?;
        self.kv.set(USER_KEY, &json).await
    }

    /// The last saved session, if both halves are present and readable.
    pub async fn load(&self) -> Option<StoredSession> {
        let token = self.read(TOKEN_KEY).await?;
        let raw_user = self.read(USER_KEY).await?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(StoredSession { token, user }),
            Err(e) => {
                warn!(error = %e, "Stored user is unreadable, ignoring session");
                None
            }
        }
    }

    /// Retain the first-login password.
    pub async fn save_temp_password(&self, password: &TempPassword) -> AppResult<()> {
        self.kv.set(TEMP_PASSWORD_KEY, password.expose()).await
    }

    /// The retained first-login password.
    pub async fn load_temp_password(&self) -> Option<TempPassword> {
        self.read(TEMP_PASSWORD_KEY).await.map(TempPassword::new)
    }

    /// Discard the first-login password.
    pub async fn clear_temp_password(&self) -> AppResult<()> {
        self.kv.remove(TEMP_PASSWORD_KEY).await
    }

    /// Remove token, user, and temp password together.
    pub async fn clear(&self) -> AppResult<()> {
        self.kv
            .remove_many(&[TOKEN_KEY, USER_KEY, TEMP_PASSWORD_KEY])
            .await
    }

    async fn read(&self, key: &str) -> Option<String> {
        match self.kv.get(key).await {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(key, error = %e, "Failed to read session value");
                None
            }
        }
    }
}

#[async_trait]
impl TokenProvider for SessionStore {
    async fn bearer_token(&self) -> Option<String> {
        self.read(TOKEN_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryKeyValueStore;
    use schooladmin_core::types::{SchoolId, UserId};
    use schooladmin_entity::user::UserRole;

    fn user() -> User {
        User {
            id: UserId(1),
            mobile_number: "9876543210".into(),
            name: "Asha".into(),
            email: String::new(),
            role: UserRole::SchoolAdmin,
            school_id: Some(SchoolId(7)),
            is_first_login: false,
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = SessionStore::new(Arc::new(MemoryKeyValueStore::new()));
        assert!(store.load().await.is_none());

        store.save("tok", &user()).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.user, user());
        assert_eq!(store.bearer_token().await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_corrupt_user_reads_as_absent() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set(TOKEN_KEY, "tok").await.unwrap();
        kv.set(USER_KEY, "{broken").await.unwrap();

        let store = SessionStore::new(kv);
        assert!(store.load().await.is_none());
    }

    #[tokio::test]
    async fn test_clear_removes_all_session_keys() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set("school_admin_theme", "light").await.unwrap();
        let store = SessionStore::new(kv.clone());
        store.save("tok", &user()).await.unwrap();
        store
            .save_temp_password(&TempPassword::new("initial1"))
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
        assert!(store.load_temp_password().await.is_none());
        assert_eq!(kv.len(), 1);
    }
}
