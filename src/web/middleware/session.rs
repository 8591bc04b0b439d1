//! Session gate for protected routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::web::handlers::AppState;

/// The signed-in user, stored in request extensions by [`require_session`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// User ID.
    pub user_id: i64,
    /// Email the user signed in with.
    pub email: String,
}

/// Resolve the session cookie to its user, resetting the idle timer.
pub async fn session_user(state: &AppState, jar: &CookieJar) -> Option<CurrentUser> {
    let cookie = jar.get(&state.cookie_name)?;
    let session = state
        .sessions
        .lock()
        .await
        .touch_session(cookie.value())
        .ok()?;

    Some(CurrentUser {
        user_id: session.user_id,
        email: session.email,
    })
}

/// Let the request through only with a live session cookie.
///
/// Anything else is redirected to `/login`.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    match session_user(&state, &jar).await {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None => {
            tracing::debug!(path = %req.uri().path(), "No valid session, redirecting to login");
            Redirect::to("/login").into_response()
        }
    }
}
