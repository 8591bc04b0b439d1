//! Login and signup pages.

use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::template::TemplateContext;
use crate::web::dto::LoginPageQuery;
use crate::web::error::ViewError;
use crate::web::handlers::AppState;

/// GET /login - Login page.
///
/// `?error` shows the bad-credentials banner, `?error=locked` the lockout
/// banner.
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoginPageQuery>,
) -> Result<Html<String>, ViewError> {
    let mut context = TemplateContext::new();
    context.set("page_title", "Login");
    context.set("error", query.error.is_some());
    context.set("locked", query.error.as_deref() == Some("locked"));

    state.render("login", &context)
}

/// GET /signup - Signup page.
pub async fn signup_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ViewError> {
    let mut context = TemplateContext::new();
    context.set("page_title", "Sign up");

    state.render("signup", &context)
}
