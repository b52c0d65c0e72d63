//! Login scenarios.
//!
//! Valid login, invalid credentials, and field-level validation, driven
//! through the page objects against the in-memory application.

use std::time::Duration;

use naranja::data::{messages, INVALID_CREDENTIALS, VALID_CREDENTIALS};
use naranja::{FakeSession, Fixtures, Screen, Session, SuiteConfig};

fn fixtures(session: &FakeSession) -> Fixtures<'_, FakeSession> {
    naranja::init_tracing();
    let config = SuiteConfig::new()
        .with_base_url(session.base_url())
        .with_action_timeout(Duration::from_millis(500))
        .with_navigation_timeout(Duration::from_millis(500))
        .with_load_timeout(Duration::from_millis(500))
        .with_visibility_timeout(Duration::from_millis(100))
        .with_poll_interval(Duration::from_millis(5));
    Fixtures::new(session, config)
}

#[tokio::test]
async fn test_valid_login_reaches_dashboard() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.login(VALID_CREDENTIALS).await.unwrap();

    let dashboard = fixtures.dashboard_screen();
    assert!(dashboard.is_loaded().await.unwrap());
    assert_eq!(dashboard.heading_text().await.unwrap(), "Dashboard");
}

#[tokio::test]
async fn test_invalid_credentials_show_error_alert() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.login(INVALID_CREDENTIALS).await.unwrap();

    assert!(login.is_error_displayed().await.unwrap());
    assert_eq!(
        login.error_message().await.unwrap(),
        messages::INVALID_LOGIN
    );

    // The session must still be on the login screen.
    let url = session.current_url().await.unwrap();
    assert!(url.contains("/auth/login"), "unexpected URL: {url}");
}

#[tokio::test]
async fn test_empty_submit_flags_both_fields_required() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.submit().await.unwrap();

    assert_eq!(login.validation_error_count().await.unwrap(), 2);
    let validation = login.validation_messages().await.unwrap();
    assert!(validation.iter().all(|m| m == messages::REQUIRED_FIELD));
}

#[tokio::test]
async fn test_missing_password_flags_one_field() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.enter_username(VALID_CREDENTIALS.username).await.unwrap();
    login.submit().await.unwrap();

    let validation = login.validation_messages().await.unwrap();
    assert_eq!(validation, vec![messages::REQUIRED_FIELD.to_string()]);
    assert!(!login.is_error_displayed().await.unwrap());
}

#[tokio::test]
async fn test_password_only_submit_flags_username_required() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.enter_password(VALID_CREDENTIALS.password).await.unwrap();
    login.submit().await.unwrap();

    let validation = login.validation_messages().await.unwrap();
    assert!(
        validation.iter().any(|m| m == messages::REQUIRED_FIELD),
        "validation: {validation:?}"
    );
    assert_eq!(validation.len(), 1);
}

#[tokio::test]
async fn test_entered_username_is_retained_in_the_field() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();
    login.enter_username("Admin").await.unwrap();

    assert_eq!(login.username_value().await.unwrap(), "Admin");
}

#[tokio::test]
async fn test_login_screen_load_check() {
    let session = FakeSession::new();
    let fixtures = fixtures(&session);

    let login = fixtures.login_screen();
    login.open().await.unwrap();

    assert_eq!(login.name(), "login");
    assert!(login.is_loaded().await.unwrap());
}
