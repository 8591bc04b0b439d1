//! Login, signup and logout flow tests.

mod common;

use axum::http::header::COOKIE;
use axum::http::{HeaderValue, StatusCode};

use common::{
    create_test_server, location, login, signup, signup_and_login, EMAIL, PASSWORD,
};
use quill::auth::UserRepository;

#[tokio::test]
async fn test_signup_stores_hashed_password() {
    let (server, state) = create_test_server().await;

    let response = server
        .post("/user")
        .form(&[("email", EMAIL), ("password", PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let user = UserRepository::new(state.db.pool())
        .find_by_email(EMAIL)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(user.password, PASSWORD);
    assert!(user.password.starts_with("$argon2id$"));
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let (server, _state) = create_test_server().await;
    signup(&server, EMAIL, PASSWORD).await;

    let response = server
        .post("/user")
        .form(&[("email", EMAIL), ("password", "another password")])
        .await;
    response.assert_status(StatusCode::CONFLICT);
    assert!(response.text().contains("already registered"));
}

#[tokio::test]
async fn test_signup_invalid_input() {
    let (server, state) = create_test_server().await;

    let response = server
        .post("/user")
        .form(&[("email", "not-an-email"), ("password", "short")])
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.text().contains("signup-error"));

    let count = UserRepository::new(state.db.pool()).count().await.unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (server, _state) = create_test_server().await;
    signup(&server, EMAIL, PASSWORD).await;

    let response = server
        .post("/login")
        .form(&[("email", EMAIL), ("password", PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/articles");

    let cookie = response.cookie("QUILL_SESSION");
    assert!(!cookie.value().is_empty());
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.path(), Some("/"));

    server.get("/articles").await.assert_status_ok();
}

#[tokio::test]
async fn test_login_accepts_username_field() {
    let (server, _state) = create_test_server().await;
    signup(&server, EMAIL, PASSWORD).await;

    let response = server
        .post("/login")
        .form(&[("username", EMAIL), ("password", PASSWORD)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/articles");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (server, _state) = create_test_server().await;
    signup(&server, EMAIL, PASSWORD).await;

    assert_eq!(login(&server, EMAIL, "wrong password").await, "/login?error");
    assert_eq!(
        login(&server, "nobody@example.com", PASSWORD).await,
        "/login?error"
    );

    server
        .get("/articles")
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_lockout() {
    let (server, _state) = create_test_server().await;
    signup(&server, EMAIL, PASSWORD).await;

    // The test config allows three attempts
    assert_eq!(login(&server, EMAIL, "bad 1").await, "/login?error");
    assert_eq!(login(&server, EMAIL, "bad 2").await, "/login?error");
    assert_eq!(login(&server, EMAIL, "bad 3").await, "/login?error");

    // Even the right password is refused while locked
    assert_eq!(login(&server, EMAIL, PASSWORD).await, "/login?error=locked");

    let page = server.get("/login?error=locked").await;
    page.assert_status_ok();
    assert!(page.text().contains("login-locked"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (server, state) = create_test_server().await;
    signup_and_login(&server).await;
    assert_eq!(state.sessions.lock().await.session_count(), 1);

    let response = server.get("/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    assert_eq!(state.sessions.lock().await.session_count(), 0);

    server
        .get("/api/articles")
        .await
        .assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_without_session() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/logout").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_relogin_replaces_session() {
    let (server, state) = create_test_server().await;
    signup_and_login(&server).await;

    assert_eq!(login(&server, EMAIL, PASSWORD).await, "/articles");
    assert_eq!(state.sessions.lock().await.session_count(), 1);
}

#[tokio::test]
async fn test_forged_cookie_is_rejected() {
    let (server, _state) = create_test_server().await;

    let response = server
        .get("/articles")
        .add_header(COOKIE, HeaderValue::from_static("QUILL_SESSION=forged-token"))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_health_is_public() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_login_ignores_email_case() {
    let (server, _state) = create_test_server().await;
    signup(&server, "Writer@Example.com", PASSWORD).await;

    assert_eq!(login(&server, "writer@example.com", PASSWORD).await, "/articles");
    assert_eq!(login(&server, " WRITER@example.com ", PASSWORD).await, "/articles");

    let response = server
        .post("/user")
        .form(&[("email", EMAIL), ("password", PASSWORD)])
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
