//! Integration tests for sign-in, first-login reset, and sign-out.

mod helpers;

use schooladmin_core::error::ErrorKind;
use schooladmin_core::traits::{HttpMethod, KeyValueStore};
use schooladmin_entity::session::{NavigationTarget, SessionPhase};
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_dashboard_requires_sign_in() {
    let t = TestApp::new().await;

    let err = t.app.context().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authentication);
    assert_eq!(t.mock.request_count(), 0);
}

#[tokio::test]
async fn test_login_by_mobile_number_sends_mobile_payload() {
    let t = TestApp::new().await;
    t.script_login(false);

    let target = t.app.session.login(" 9876543210 ", "secret123").await.unwrap();
    assert_eq!(target, NavigationTarget::Dashboard);

    let body = t.mock.requests_to(HttpMethod::Post, "/auth/login")[0]
        .json_body()
        .cloned()
        .unwrap();
    assert_eq!(body["mobileNumber"], "9876543210");
    assert!(body.get("username").is_none());

    let ctx = t.app.context().await.unwrap();
    assert_eq!(ctx.school_id.to_string(), "1");
}

#[tokio::test]
async fn test_wrong_role_is_refused_and_nothing_persisted() {
    let t = TestApp::new().await;
    t.mock.on(
        HttpMethod::Post,
        "/auth/login",
        200,
        json!({"accessToken": "tok", "id": 1, "role": "parent"}),
    );

    let err = t.app.session.login("someone", "pw").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(t.app.session.phase().await, SessionPhase::Anonymous);
    assert_eq!(t.kv.get("token").await.unwrap(), None);
}

#[tokio::test]
async fn test_first_login_reset_unlocks_dashboard() {
    let t = TestApp::new().await;
    t.script_login(true);
    t.mock.on(
        HttpMethod::Post,
        "/auth/change-password",
        200,
        json!({"message": "Password updated"}),
    );

    let target = t.app.session.login("principal", "initial1").await.unwrap();
    assert_eq!(target, NavigationTarget::ResetPassword);
    assert_eq!(t.app.context().await.unwrap_err().kind, ErrorKind::Session);

    let err = t
        .app
        .session
        .reset_password("short", "short")
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let message = t
        .app
        .session
        .reset_password("longenough1", "longenough1")
        .await
        .unwrap();
    assert_eq!(message, "Password updated");

    let sent = t.mock.requests_to(HttpMethod::Post, "/auth/change-password")[0]
        .json_body()
        .cloned()
        .unwrap();
    assert_eq!(sent["currentPassword"], "initial1");
    assert_eq!(sent["newPassword"], "longenough1");
    assert!(t.app.context().await.is_ok());
    assert_eq!(t.kv.get("tempPassword").await.unwrap(), None);
}

#[tokio::test]
async fn test_session_survives_restart() {
    let t = TestApp::logged_in().await;

    let restarted = t.restart().await;
    assert_eq!(restarted.session.phase().await, SessionPhase::Authenticated);
    let ctx = restarted.context().await.unwrap();
    assert_eq!(ctx.name, "principal");
}

#[tokio::test]
async fn test_logout_clears_session_but_keeps_theme() {
    let t = TestApp::logged_in().await;
    t.app
        .preferences
        .set_theme(schooladmin_entity::preference::ThemePreference::Light)
        .await
        .unwrap();

    let target = t.app.session.logout().await.unwrap();
    assert_eq!(target, NavigationTarget::Login);
    assert_eq!(t.app.session.phase().await, SessionPhase::Anonymous);
    assert_eq!(t.kv.get("token").await.unwrap(), None);
    assert_eq!(t.kv.get("user").await.unwrap(), None);

    let restarted = t.restart().await;
    assert_eq!(restarted.session.phase().await, SessionPhase::Anonymous);
    assert_eq!(
        restarted.preferences.theme().await,
        schooladmin_entity::preference::ThemePreference::Light
    );
}

#[tokio::test]
async fn test_requests_carry_bearer_token_after_login() {
    let t = TestApp::logged_in().await;
    t.mock
        .on(HttpMethod::Get, "/schools/1/services", 200, json!([]));

    let ctx = t.app.context().await.unwrap();
    let services = t.app.catalog.list(&ctx).await.unwrap();
    assert!(services.is_empty());

    let request = &t.mock.requests_to(HttpMethod::Get, "/schools/1/services")[0];
    assert_eq!(request.bearer.as_deref(), Some("tok-42"));
}
