//! Login, signup and logout form handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;
use validator::Validate;

use crate::auth::{normalize_email, SessionError, UserService};
use crate::template::TemplateContext;
use crate::web::dto::{AddUserRequest, LoginForm};
use crate::web::error::{field_messages, ViewError};
use crate::web::handlers::AppState;
use crate::QuillError;

/// POST /login - Check credentials and start a session.
///
/// Redirects to `/articles` on success, `/login?error` on bad credentials
/// and `/login?error=locked` while the email is locked out.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), ViewError> {
    let email = normalize_email(&form.email);

    if let Err(SessionError::AccountLocked(_)) = state.sessions.lock().await.check_login(&email) {
        return Ok((jar, Redirect::to("/login?error=locked")));
    }

    let user = match UserService::new(&state.db, &state.hasher)
        .authenticate(&email, &form.password)
        .await
    {
        Ok(user) => Some(user),
        Err(QuillError::Auth(_)) => None,
        Err(e) => return Err(state.view_error(e)),
    };

    let mut sessions = state.sessions.lock().await;
    match sessions.login(&email, user.as_ref()) {
        Ok(session) => {
            // Never reuse a token that existed before authentication
            if let Some(previous) = jar.get(&state.cookie_name) {
                sessions.logout(previous.value());
            }

            let cookie = Cookie::build((state.cookie_name.clone(), session.token))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .build();
            Ok((jar.add(cookie), Redirect::to("/articles")))
        }
        Err(SessionError::AccountLocked(_)) => Ok((jar, Redirect::to("/login?error=locked"))),
        Err(_) => Ok((jar, Redirect::to("/login?error"))),
    }
}

/// Re-render the signup page with a message.
fn signup_failure(
    state: &AppState,
    status: StatusCode,
    email: &str,
    message: &str,
) -> Result<Response, ViewError> {
    let mut context = TemplateContext::new();
    context.set("page_title", "Sign up");
    context.set("email", email);
    context.set("message", message);

    let Html(body) = state.render("signup", &context)?;
    Ok((status, Html(body)).into_response())
}

/// POST /user - Register an account, then send the user to the login page.
///
/// Invalid input re-renders the form with 422, a taken email with 409.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Form(request): Form<AddUserRequest>,
) -> Result<Response, ViewError> {
    if let Err(errors) = request.validate() {
        let mut messages: Vec<String> = field_messages(&errors).into_values().flatten().collect();
        messages.sort();
        return signup_failure(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            &request.email,
            &messages.join(" "),
        );
    }

    let service = UserService::new(&state.db, &state.hasher);
    match service.save(&request.email, &request.password).await {
        Ok(_) => Ok(Redirect::to("/login").into_response()),
        Err(QuillError::Conflict(_)) => signup_failure(
            &state,
            StatusCode::CONFLICT,
            &request.email,
            "That email is already registered.",
        ),
        Err(QuillError::Validation(msg)) => signup_failure(
            &state,
            StatusCode::UNPROCESSABLE_ENTITY,
            &request.email,
            &msg,
        ),
        Err(e) => Err(state.view_error(e)),
    }
}

/// GET /logout - End the session, if any, and go back to the login page.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(cookie) = jar.get(&state.cookie_name) {
        state.sessions.lock().await.logout(cookie.value());
    }

    let removal = Cookie::build(state.cookie_name.clone()).path("/");
    (jar.remove(removal), Redirect::to("/login"))
}
