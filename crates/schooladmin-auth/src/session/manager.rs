//! Session lifecycle manager: initialize, login, reset, logout.

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use validator::Validate;

use schooladmin_core::config::AuthConfig;
use schooladmin_core::error::AppError;
use schooladmin_core::result::AppResult;
use schooladmin_core::types::SchoolId;
use schooladmin_entity::session::{
    NavigationTarget, SessionPhase, SessionSnapshot, StoredSession, TempPassword,
};
use schooladmin_entity::user::{ProfileUpdate, User};

use crate::busy::BusyFlag;
use crate::password::PasswordPolicy;

use super::service::AuthService;
use super::store::SessionStore;

/// In-memory mirror of the persisted session.
#[derive(Debug)]
struct SessionState {
    phase: SessionPhase,
    token: Option<String>,
    user: Option<User>,
    temp_password: Option<TempPassword>,
}

impl SessionState {
    fn loading() -> Self {
        Self {
            phase: SessionPhase::Loading,
            token: None,
            user: None,
            temp_password: None,
        }
    }

    fn signed_in_phase(user: &User) -> SessionPhase {
        if user.is_first_login {
            SessionPhase::PasswordResetPending
        } else {
            SessionPhase::Authenticated
        }
    }

    fn reset(&mut self) {
        self.phase = SessionPhase::Anonymous;
        self.token = None;
        self.user = None;
        self.temp_password = None;
    }
}

/// Process-wide session state. Every transition is written through to the
/// [`SessionStore`] before it becomes visible.
///
/// Shared by `Arc`; reads take a snapshot, so callers never hold the lock
/// across a network call.
#[derive(Debug)]
pub struct SessionManager {
    auth: AuthService,
    store: SessionStore,
    config: AuthConfig,
    state: RwLock<SessionState>,
    login_busy: BusyFlag,
    password_busy: BusyFlag,
    profile_busy: BusyFlag,
}

impl SessionManager {
    /// Creates a manager in the `Loading` phase.
    pub fn new(auth: AuthService, store: SessionStore, config: AuthConfig) -> Self {
        Self {
            auth,
            store,
            config,
            state: RwLock::new(SessionState::loading()),
            login_busy: BusyFlag::new(),
            password_busy: BusyFlag::new(),
            profile_busy: BusyFlag::new(),
        }
    }

    /// Restore any persisted session. Calling it again re-reads the store.
    pub async fn initialize(&self) -> SessionSnapshot {
        let stored = self.store.load().await;
        let temp_password = self.store.load_temp_password().await;

        let mut state = self.state.write().await;
        match stored {
            Some(session) => {
                state.phase = SessionState::signed_in_phase(&session.user);
                state.token = Some(session.token);
                state.user = Some(session.user);
            }
            None => {
                state.phase = SessionPhase::Anonymous;
                state.token = None;
                state.user = None;
            }
        }
        state.temp_password = temp_password;
        debug!(phase = %state.phase, "Session initialized");
        snapshot_of(&state)
    }

    /// True until [`initialize`](Self::initialize) completes.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.phase == SessionPhase::Loading
    }

    /// Current phase.
    pub async fn phase(&self) -> SessionPhase {
        self.state.read().await.phase
    }

    /// Read-only copy of the session.
    pub async fn snapshot(&self) -> SessionSnapshot {
        snapshot_of(&*self.state.read().await)
    }

    /// The signed-in user, if any.
    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    /// Sign in. On failure the phase and session are left as they were.
    pub async fn login(&self, identifier: &str, password: &str) -> AppResult<NavigationTarget> {
        let _busy = self.login_busy.try_acquire("Login")?;

        let prior = {
            let mut state = self.state.write().await;
            if state.phase == SessionPhase::Loading {
                return Err(AppError::session("Session is still loading"));
            }
            let prior = state.phase;
            state.phase = SessionPhase::Authenticating;
            prior
        };

        let (token, user) = match self.authenticate(identifier, password).await {
            Ok(parts) => parts,
            Err(e) => {
                self.state.write().await.phase = prior;
                return Err(e);
            }
        };

        let temp_password = user.is_first_login.then(|| TempPassword::new(password));
        let mut state = self.state.write().await;
        state.phase = SessionState::signed_in_phase(&user);
        state.token = Some(token);
        state.user = Some(user.clone());
        state.temp_password = temp_password;

        info!(user_id = %user.id, phase = %state.phase, "Signed in");
        Ok(NavigationTarget::after_login(&user))
    }

    /// Backend login plus persistence; nothing in memory changes here.
    ///
    /// If any write fails, the store is put back to the session it held
    /// before, so a later `initialize` never restores a half-saved login.
    async fn authenticate(&self, identifier: &str, password: &str) -> AppResult<(String, User)> {
        let (token, user) = self.auth.login(identifier, password).await?;

        let previous = self.store.load().await;
        let previous_temp = self.store.load_temp_password().await;
        if let Err(e) = self.persist(&token, &user, password).await {
            warn!(user_id = %user.id, error = %e, "Failed to persist session, rolling back");
            self.restore(previous, previous_temp).await;
            return Err(e);
        }
        Ok((token, user))
    }

    async fn persist(&self, token: &str, user: &User, password: &str) -> AppResult<()> {
        self.store.save(token, user).await?;
        if user.is_first_login {
            self.store
                .save_temp_password(&TempPassword::new(password))
                .await
        } else {
            self.store.clear_temp_password().await
        }
    }

    async fn restore(&self, previous: Option<StoredSession>, temp: Option<TempPassword>) {
        let result = match previous {
            Some(session) => self.restore_session(&session, temp.as_ref()).await,
            None => self.store.clear().await,
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to roll back session store");
        }
    }

    async fn restore_session(
        &self,
        session: &StoredSession,
        temp: Option<&TempPassword>,
    ) -> AppResult<()> {
        self.store.save(&session.token, &session.user).await?;
        match temp {
            Some(temp) => self.store.save_temp_password(temp).await,
            None => self.store.clear_temp_password().await,
        }
    }

    /// Complete the first-login reset using the retained password.
    pub async fn reset_password(&self, new_password: &str, confirm: &str) -> AppResult<String> {
        let _busy = self.password_busy.try_acquire("Password reset")?;
        PasswordPolicy::first_login(&self.config).validate(new_password, confirm)?;

        let (user, current) = {
            let state = self.state.read().await;
            let user = require_user(&state)?;
            let current = state.temp_password.clone();
            (user, current)
        };
        let current = match current {
            Some(pw) => pw,
            None => {
                warn!(user_id = %user.id, "No retained password for reset, sending empty");
                TempPassword::new(String::new())
            }
        };

        let message = self.auth.reset_password(new_password, current.expose()).await?;

        let updated = user.with_password_reset();
        self.store.save_user(&updated).await?;
        self.store.clear_temp_password().await?;

        let mut state = self.state.write().await;
        state.user = Some(updated);
        state.temp_password = None;
        if state.token.is_some() {
            state.phase = SessionPhase::Authenticated;
        }
        info!(user_id = %user.id, "First-login password reset completed");
        Ok(message)
    }

    /// Account-settings password change. Ends the session on success.
    pub async fn change_password(
        &self,
        current: &str,
        new_password: &str,
        confirm: &str,
    ) -> AppResult<(String, NavigationTarget)> {
        let _busy = self.password_busy.try_acquire("Password change")?;
        PasswordPolicy::account_change(&self.config).validate(new_password, confirm)?;
        require_user(&*self.state.read().await)?;

        let message = self.auth.reset_password(new_password, current).await?;
        let target = self.logout().await?;
        Ok((message, target))
    }

    /// Send a profile edit and write the result through to the session.
    pub async fn update_profile(&self, fields: &ProfileUpdate) -> AppResult<(String, User)> {
        let _busy = self.profile_busy.try_acquire("Profile update")?;
        fields.validate()?;
        if fields.is_empty() {
            return Err(AppError::validation("Nothing to update"));
        }
        let user = require_user(&*self.state.read().await)?;

        let message = self.auth.update_profile(fields).await?;
        let updated = fields.apply_to(&user);
        self.update_user(updated.clone()).await?;
        Ok((message, updated))
    }

    /// Replace the signed-in user locally and in the store.
    pub async fn update_user(&self, user: User) -> AppResult<()> {
        require_user(&*self.state.read().await)?;
        self.store.save_user(&user).await?;
        self.state.write().await.user = Some(user);
        Ok(())
    }

    /// End the session from any phase. Idempotent.
    pub async fn logout(&self) -> AppResult<NavigationTarget> {
        self.state.write().await.reset();
        self.auth.logout().await
    }

    /// The user, when the dashboard may be used.
    pub async fn require_dashboard(&self) -> AppResult<User> {
        let state = self.state.read().await;
        match state.phase {
            SessionPhase::Authenticated => require_user(&state),
            SessionPhase::PasswordResetPending => Err(AppError::session(
                "Please reset your password before continuing",
            )),
            SessionPhase::Loading => Err(AppError::session("Session is still loading")),
            SessionPhase::Anonymous | SessionPhase::Authenticating => {
                Err(AppError::authentication("Please sign in first"))
            }
        }
    }

    /// The school the signed-in administrator manages.
    pub async fn require_school(&self) -> AppResult<SchoolId> {
        self.require_dashboard()
            .await?
            .school_id
            .ok_or_else(|| AppError::session("This account is not linked to a school"))
    }
}

fn require_user(state: &SessionState) -> AppResult<User> {
    match (&state.token, &state.user) {
        (Some(_), Some(user)) => Ok(user.clone()),
        _ => Err(AppError::authentication("Please sign in first")),
    }
}

fn snapshot_of(state: &SessionState) -> SessionSnapshot {
    SessionSnapshot {
        phase: state.phase,
        token: state.token.clone(),
        user: state.user.clone(),
        holds_temp_password: state.temp_password.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use schooladmin_core::error::ErrorKind;
    use schooladmin_core::traits::{HttpMethod, KeyValueStore};
    use schooladmin_core::types::UserId;
    use schooladmin_entity::user::UserRole;
    use schooladmin_http::ApiClient;
    use schooladmin_http::mock::MockTransport;
    use serde_json::json;

    use async_trait::async_trait;

    use crate::session::store::{TEMP_PASSWORD_KEY, TOKEN_KEY, USER_KEY};
    use crate::store::MemoryKeyValueStore;

    /// Memory store that refuses writes to one key.
    #[derive(Debug)]
    struct RefusingStore {
        inner: MemoryKeyValueStore,
        refused: &'static str,
    }

    #[async_trait]
    impl KeyValueStore for RefusingStore {
        async fn get(&self, key: &str) -> AppResult<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> AppResult<()> {
            if key == self.refused {
                return Err(AppError::storage(format!("Disk full writing {key}")));
            }
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> AppResult<()> {
            self.inner.remove(key).await
        }

        async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
            self.inner.remove_many(keys).await
        }
    }

    fn manager_over(mock: &Arc<MockTransport>, kv: Arc<dyn KeyValueStore>) -> SessionManager {
        let store = SessionStore::new(kv);
        let api = ApiClient::new(mock.clone(), Arc::new(store.clone()));
        SessionManager::new(
            AuthService::new(api, store.clone()),
            store,
            AuthConfig::default(),
        )
    }

    struct Fixture {
        mock: Arc<MockTransport>,
        kv: Arc<MemoryKeyValueStore>,
        manager: SessionManager,
    }

    fn fixture() -> Fixture {
        let mock = Arc::new(MockTransport::new());
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = SessionStore::new(kv.clone());
        let api = ApiClient::new(mock.clone(), Arc::new(store.clone()));
        let manager = SessionManager::new(
            AuthService::new(api, store.clone()),
            store,
            AuthConfig::default(),
        );
        Fixture { mock, kv, manager }
    }

    fn login_ok(mock: &MockTransport, first_login: bool) {
        mock.on(
            HttpMethod::Post,
            "/auth/login",
            200,
            json!({
                "accessToken": "tok-1",
                "id": 11,
                "username": "principal",
                "role": "school_admin",
                "schoolId": 3,
                "requirePasswordReset": first_login
            }),
        );
    }

    #[tokio::test]
    async fn test_loading_until_initialized() {
        let f = fixture();
        assert!(f.manager.is_loading().await);
        let snapshot = f.manager.initialize().await;
        assert_eq!(snapshot.phase, SessionPhase::Anonymous);
        assert!(!f.manager.is_loading().await);
    }

    #[tokio::test]
    async fn test_login_persists_and_authenticates() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, false);

        let target = f.manager.login("principal", "secret").await.unwrap();
        assert_eq!(target, NavigationTarget::Dashboard);
        assert_eq!(f.manager.phase().await, SessionPhase::Authenticated);
        assert_eq!(f.kv.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok-1"));
        assert_eq!(f.kv.get(TEMP_PASSWORD_KEY).await.unwrap(), None);
        assert_eq!(f.manager.require_school().await.unwrap(), SchoolId(3));
    }

    #[tokio::test]
    async fn test_failed_login_restores_prior_phase() {
        let f = fixture();
        f.manager.initialize().await;
        f.mock.on(
            HttpMethod::Post,
            "/auth/login",
            401,
            json!({"message": "Invalid credentials"}),
        );

        let err = f.manager.login("principal", "bad").await.unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(f.manager.phase().await, SessionPhase::Anonymous);
        assert!(f.kv.is_empty());
    }

    #[tokio::test]
    async fn test_failed_session_write_leaves_store_signed_out() {
        let mock = Arc::new(MockTransport::new());
        let kv = Arc::new(RefusingStore {
            inner: MemoryKeyValueStore::new(),
            refused: TEMP_PASSWORD_KEY,
        });
        let manager = manager_over(&mock, kv.clone());
        manager.initialize().await;
        login_ok(&mock, true);

        let err = manager.login("principal", "initial1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert_eq!(manager.phase().await, SessionPhase::Anonymous);
        assert_eq!(kv.get(TOKEN_KEY).await.unwrap(), None);
        assert_eq!(kv.get(USER_KEY).await.unwrap(), None);

        let restarted = manager_over(&mock, kv);
        assert_eq!(restarted.initialize().await.phase, SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_failed_session_write_keeps_previous_session() {
        let mock = Arc::new(MockTransport::new());
        let inner = MemoryKeyValueStore::new();
        inner.set(TOKEN_KEY, "tok-old").await.unwrap();
        inner
            .set(
                USER_KEY,
                &serde_json::to_string(&User {
                    id: UserId(7),
                    mobile_number: String::new(),
                    name: "Earlier Admin".into(),
                    email: String::new(),
                    role: UserRole::SchoolAdmin,
                    school_id: Some(SchoolId(2)),
                    is_first_login: false,
                })
                .unwrap(),
            )
            .await
            .unwrap();
        let kv = Arc::new(RefusingStore {
            inner,
            refused: TEMP_PASSWORD_KEY,
        });
        let manager = manager_over(&mock, kv.clone());
        manager.initialize().await;
        login_ok(&mock, true);

        manager.login("principal", "initial1").await.unwrap_err();
        assert_eq!(kv.get(TOKEN_KEY).await.unwrap().as_deref(), Some("tok-old"));
        let restored = manager_over(&mock, kv).initialize().await;
        assert_eq!(restored.phase, SessionPhase::Authenticated);
        assert_eq!(restored.user.unwrap().name, "Earlier Admin");
    }

    #[tokio::test]
    async fn test_first_login_gates_dashboard_until_reset() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, true);
        f.mock
            .on(HttpMethod::Post, "/auth/change-password", 200, json!({"message": "Done"}));

        let target = f.manager.login("principal", "initial1").await.unwrap();
        assert_eq!(target, NavigationTarget::ResetPassword);
        assert!(f.manager.snapshot().await.holds_temp_password);
        let err = f.manager.require_dashboard().await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Session);

        let err = f.manager.reset_password("short", "short").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(f.mock.requests_to(HttpMethod::Post, "/auth/change-password").len(), 0);

        let message = f.manager.reset_password("brandnew1", "brandnew1").await.unwrap();
        assert_eq!(message, "Done");
        let sent = &f.mock.requests_to(HttpMethod::Post, "/auth/change-password")[0];
        assert_eq!(sent.json_body().unwrap()["currentPassword"], "initial1");

        let user = f.manager.require_dashboard().await.unwrap();
        assert!(!user.is_first_login);
        assert!(!f.manager.snapshot().await.holds_temp_password);
        assert_eq!(f.kv.get(TEMP_PASSWORD_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_restored_after_restart() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, true);
        f.manager.login("principal", "initial1").await.unwrap();

        let store = SessionStore::new(f.kv.clone());
        let api = ApiClient::new(f.mock.clone(), Arc::new(store.clone()));
        let restarted = SessionManager::new(
            AuthService::new(api, store.clone()),
            store,
            AuthConfig::default(),
        );
        let snapshot = restarted.initialize().await;
        assert_eq!(snapshot.phase, SessionPhase::PasswordResetPending);
        assert!(snapshot.holds_temp_password);
        assert_eq!(snapshot.token.as_deref(), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, false);
        f.manager.login("principal", "secret").await.unwrap();

        assert_eq!(f.manager.logout().await.unwrap(), NavigationTarget::Login);
        assert_eq!(f.manager.logout().await.unwrap(), NavigationTarget::Login);
        assert_eq!(f.manager.phase().await, SessionPhase::Anonymous);
        assert!(f.kv.is_empty());
        assert_eq!(
            f.manager.require_dashboard().await.unwrap_err().kind,
            ErrorKind::Authentication
        );
    }

    #[tokio::test]
    async fn test_change_password_logs_out() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, false);
        f.mock.on(HttpMethod::Post, "/auth/change-password", 200, json!({}));
        f.manager.login("principal", "secret").await.unwrap();

        let err = f
            .manager
            .change_password("secret", "abcde", "abcde")
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let (message, target) = f
            .manager
            .change_password("secret", "abcdef", "abcdef")
            .await
            .unwrap();
        assert_eq!(message, "Password changed successfully");
        assert_eq!(target, NavigationTarget::Login);
        assert_eq!(f.manager.phase().await, SessionPhase::Anonymous);
    }

    #[tokio::test]
    async fn test_update_profile_writes_through() {
        let f = fixture();
        f.manager.initialize().await;
        login_ok(&f.mock, false);
        f.mock.on(HttpMethod::Put, "/auth/profile", 200, json!({"message": "Saved"}));
        f.manager.login("principal", "secret").await.unwrap();

        let fields = ProfileUpdate {
            name: Some("Asha Rao".into()),
            email: Some("asha@school.in".into()),
        };
        let (message, user) = f.manager.update_profile(&fields).await.unwrap();
        assert_eq!(message, "Saved");
        assert_eq!(user.name, "Asha Rao");

        let stored = SessionStore::new(f.kv.clone()).load().await.unwrap();
        assert_eq!(stored.user.email, "asha@school.in");
    }
}
