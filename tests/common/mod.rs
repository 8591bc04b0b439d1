//! Test helpers for the web integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer, TestServerConfig};
use quill::config::Config;
use quill::web::{create_app, AppState};
use quill::Database;

pub const EMAIL: &str = "writer@example.com";
pub const PASSWORD: &str = "correct horse";

/// Configuration with cheap hashing and no static files.
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.web.serve_static = false;
    config.password.memory_kib = 8192;
    config.password.iterations = 1;
    config.password.parallelism = 1;
    config.session.max_login_attempts = 3;
    config
}

/// Create a cookie-keeping test server over an in-memory database.
pub async fn create_test_server_with(config: Config) -> (TestServer, Arc<AppState>) {
    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");
    let state = Arc::new(AppState::new(db, &config).expect("Failed to build app state"));

    let server = TestServer::new_with_config(
        create_app(state.clone(), &config.web),
        TestServerConfig {
            save_cookies: true,
            ..TestServerConfig::default()
        },
    )
    .expect("Failed to create test server");

    (server, state)
}

pub async fn create_test_server() -> (TestServer, Arc<AppState>) {
    create_test_server_with(create_test_config()).await
}

/// Register an account through the signup form.
pub async fn signup(server: &TestServer, email: &str, password: &str) {
    let response = server
        .post("/user")
        .form(&[("email", email), ("password", password)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

/// Submit the login form and return the redirect target.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("email", email), ("password", password)])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    location(&response)
}

/// Sign up and log in with the default account.
pub async fn signup_and_login(server: &TestServer) {
    signup(server, EMAIL, PASSWORD).await;
    assert_eq!(login(server, EMAIL, PASSWORD).await, "/articles");
}

/// Value of the `Location` header.
pub fn location(response: &TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .expect("Location header is not ASCII")
        .to_string()
}
