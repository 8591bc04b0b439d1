//! Quill - a small blog backend.
//!
//! Articles are managed through a JSON API and a set of server-rendered
//! pages, both behind a cookie session.

pub mod article;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod template;
pub mod web;

pub use article::{Article, ArticleService, NewArticle};
pub use auth::{PasswordHasher, SessionManager, User, UserService};
pub use config::Config;
pub use db::Database;
pub use error::{QuillError, Result};
pub use web::{create_app, AppState, WebServer};
