//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use schooladmin_auth::MemoryKeyValueStore;
use schooladmin_cli::App;
use schooladmin_core::config::AppConfig;
use schooladmin_core::traits::HttpMethod;
use schooladmin_http::mock::MockTransport;

/// Test application context
pub struct TestApp {
    /// The wired application
    pub app: App,
    /// Scripted backend
    pub mock: Arc<MockTransport>,
    /// Backing key-value store, shared across restarts
    pub kv: Arc<MemoryKeyValueStore>,
}

impl TestApp {
    /// Application over a fresh mock and empty storage, session initialized.
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let mock = Arc::new(MockTransport::new());
        let kv = Arc::new(MemoryKeyValueStore::new());
        let app = App::build(config, mock.clone(), kv.clone());
        app.session.initialize().await;
        Self { app, mock, kv }
    }

    /// A second process over the same storage and backend.
    pub async fn restart(&self) -> App {
        let app = App::build(self.app.config.clone(), self.mock.clone(), self.kv.clone());
        app.session.initialize().await;
        app
    }

    /// Script a successful login answer.
    pub fn script_login(&self, first_login: bool) {
        self.mock.on(
            HttpMethod::Post,
            "/auth/login",
            200,
            json!({
                "accessToken": "tok-42",
                "id": 42,
                "username": "principal",
                "mobileNumber": "9876543210",
                "role": "school_admin",
                "schoolId": 1,
                "requirePasswordReset": first_login
            }),
        );
    }

    /// Sign in with a permanent password.
    pub async fn logged_in() -> Self {
        let t = Self::new().await;
        t.script_login(false);
        t.app
            .session
            .login("principal", "secret123")
            .await
            .expect("login");
        t
    }
}
