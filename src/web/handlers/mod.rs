//! Handlers for the JSON API and the HTML views.

pub mod article_api;
pub mod article_view;
pub mod fallback;
pub mod user;
pub mod user_view;

pub use article_api::*;
pub use article_view::*;
pub use fallback::*;
pub use user::*;
pub use user_view::*;

use axum::http::StatusCode;
use axum::response::Html;
use tokio::sync::Mutex;

use crate::auth::{PasswordHasher, SessionManager};
use crate::config::Config;
use crate::db::Database;
use crate::template::{builtin_engine, escape_html, TemplateContext, TemplateEngine};
use crate::web::error::{view_status, ViewError};
use crate::{QuillError, Result};

/// Shared application state.
pub struct AppState {
    /// Database pool.
    pub db: Database,
    /// In-memory session table.
    pub sessions: Mutex<SessionManager>,
    /// Password hasher.
    pub hasher: PasswordHasher,
    /// Parsed HTML templates.
    pub templates: TemplateEngine,
    /// Name of the session cookie.
    pub cookie_name: String,
}

impl AppState {
    /// Build the state from the loaded configuration.
    pub fn new(db: Database, config: &Config) -> Result<Self> {
        Ok(Self {
            db,
            sessions: Mutex::new(SessionManager::new(&config.session)),
            hasher: PasswordHasher::new(&config.password)?,
            templates: builtin_engine()?,
            cookie_name: config.session.cookie_name.clone(),
        })
    }

    /// Render a page template.
    pub fn render(
        &self,
        name: &str,
        context: &TemplateContext,
    ) -> std::result::Result<Html<String>, ViewError> {
        self.templates.render(name, context).map(Html).map_err(|e| {
            tracing::error!(template = name, error = %e, "Failed to render template");
            self.error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page")
        })
    }

    /// Turn a domain error into a rendered error page.
    pub fn view_error(&self, err: QuillError) -> ViewError {
        let status = view_status(&err);
        if status.is_server_error() {
            tracing::error!(error = %err, "Internal error while rendering view");
            self.error_page(status, "An internal error occurred")
        } else {
            self.error_page(status, &err.to_string())
        }
    }

    /// Render the error template with a status and message.
    ///
    /// Falls back to a bare HTML page if the template itself fails.
    pub fn error_page(&self, status: StatusCode, message: &str) -> ViewError {
        let mut context = TemplateContext::new();
        context.set("page_title", "Error");
        context.set("status", i64::from(status.as_u16()));
        context.set("message", message);

        let body = self
            .templates
            .render("error", &context)
            .unwrap_or_else(|_| {
                format!(
                    "<!DOCTYPE html><html><body><h1>{}</h1><p>{}</p></body></html>",
                    status.as_u16(),
                    escape_html(message)
                )
            });
        ViewError::new(status, body)
    }
}
