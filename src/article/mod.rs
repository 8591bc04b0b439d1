//! Article module for Quill.
//!
//! The article model, its SQLite repository and the service used by both
//! the JSON API and the HTML views.

mod model;
mod repository;
mod service;

pub use model::{Article, NewArticle};
pub use repository::ArticleRepository;
pub use service::{ArticleService, MAX_CONTENT_LENGTH, MAX_TITLE_LENGTH};
