//! Response DTOs for the JSON API and view models for the HTML pages.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::article::Article;

/// Title and content of an article, as returned by the read endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleResponse {
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            content: article.content,
        }
    }
}

/// Full article record, returned after create and update.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleDetailResponse {
    /// Article ID.
    pub id: i64,
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<Article> for ArticleDetailResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            created_at: article.created_at,
            updated_at: article.updated_at,
        }
    }
}

/// One row of the article list page.
#[derive(Debug, Serialize)]
pub struct ArticleListViewResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl From<Article> for ArticleListViewResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
        }
    }
}

/// Article shown on the detail and editor pages.
///
/// The default value is the empty article used when writing a new one.
#[derive(Debug, Default, Serialize)]
pub struct ArticleViewResponse {
    pub id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: Option<String>,
}

impl From<Article> for ArticleViewResponse {
    fn from(article: Article) -> Self {
        Self {
            id: Some(article.id),
            title: article.title,
            content: article.content,
            created_at: Some(article.created_at.format("%Y-%m-%d %H:%M").to_string()),
        }
    }
}
