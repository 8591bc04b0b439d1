//! Router configuration for the web layer.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_article, article_page, articles_page, delete_article, find_all_articles, find_article,
    login, login_page, logout, new_article_page, not_found_page, root_redirect, signup,
    signup_page, update_article, AppState,
};
use super::middleware::{create_cors_layer, require_session, security_headers};
use super::openapi::openapi_json;
use crate::config::WebConfig;

/// Create the application router.
///
/// Login, signup and logout are public; every other route, unknown paths
/// included, goes through the session gate.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/login", get(login_page).post(login))
        .route("/signup", get(signup_page))
        .route("/user", post(signup))
        .route("/logout", get(logout));

    let protected_routes = Router::new()
        .route("/", get(root_redirect))
        .route("/api/articles", get(find_all_articles).post(add_article))
        .route(
            "/api/articles/:id",
            get(find_article).put(update_article).delete(delete_article),
        )
        .route("/articles", get(articles_page))
        .route("/articles/:id", get(article_page))
        .route("/new-article", get(new_article_page))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            require_session,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .fallback(not_found_page)
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Create the static file router, if the directory exists.
pub fn create_static_router(static_path: &str) -> Option<Router> {
    if !Path::new(static_path).is_dir() {
        tracing::warn!(path = static_path, "Static directory not found, /static disabled");
        return None;
    }
    Some(Router::new().nest_service("/static", ServeDir::new(static_path)))
}

/// Assemble the full application: routes, health check and static files,
/// then tracing, security headers, CORS and compression over all of them.
pub fn create_app(app_state: Arc<AppState>, web_config: &WebConfig) -> Router {
    let mut router = create_router(app_state).merge(create_health_router());

    if web_config.serve_static {
        if let Some(static_router) = create_static_router(&web_config.static_path) {
            router = router.merge(static_router);
        }
    }

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(security_headers))
            .layer(create_cors_layer(&web_config.cors_origins))
            .layer(CompressionLayer::new()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_router() {
        let response = create_health_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_static_router_missing_dir() {
        assert!(create_static_router("definitely/not/here").is_none());
    }
}
