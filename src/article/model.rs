//! Article model for Quill.

use chrono::{DateTime, Utc};

/// A stored blog article.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Article {
    /// Unique article ID, assigned on insert.
    pub id: i64,
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
    /// When the article was inserted.
    pub created_at: DateTime<Utc>,
    /// When the article was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Article {
    /// Replace the title and content and refresh `updated_at`.
    pub fn update(&mut self, title: impl Into<String>, content: impl Into<String>) {
        self.title = title.into();
        self.content = content.into();
        self.updated_at = Utc::now();
    }
}

/// Data for creating a new article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    /// Article title.
    pub title: String,
    /// Article body.
    pub content: String,
}

impl NewArticle {
    /// Create a new article with the given title and content.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article() {
        let article = NewArticle::new("title", "content");
        assert_eq!(article.title, "title");
        assert_eq!(article.content, "content");
    }

    #[test]
    fn test_update_refreshes_timestamp() {
        let created = Utc::now() - chrono::Duration::hours(1);
        let mut article = Article {
            id: 1,
            title: "old".to_string(),
            content: "old body".to_string(),
            created_at: created,
            updated_at: created,
        };

        article.update("new", "new body");

        assert_eq!(article.id, 1);
        assert_eq!(article.title, "new");
        assert_eq!(article.content, "new body");
        assert_eq!(article.created_at, created);
        assert!(article.updated_at > created);
    }
}
