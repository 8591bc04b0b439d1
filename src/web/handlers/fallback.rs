//! Catch-all for paths no route matches.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::web::handlers::AppState;
use crate::web::middleware::session_user;

/// Unknown paths are gated like any other page: anonymous visitors go to
/// `/login`, signed-in users get the 404 page.
pub async fn not_found_page(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if session_user(&state, &jar).await.is_none() {
        return Redirect::to("/login").into_response();
    }

    state
        .error_page(StatusCode::NOT_FOUND, "Page not found")
        .into_response()
}
