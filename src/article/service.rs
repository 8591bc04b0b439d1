//! Article service for Quill.
//!
//! Sits between the handlers and [`ArticleRepository`]: checks input,
//! turns missing rows into [`QuillError::NotFound`] and logs mutations.

use tracing::{debug, info};

use super::model::{Article, NewArticle};
use super::repository::ArticleRepository;
use crate::db::Database;
use crate::{QuillError, Result};

/// Maximum length for article titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for article content (in characters).
pub const MAX_CONTENT_LENGTH: usize = 50_000;

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(QuillError::Validation("title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(QuillError::Validation(format!(
            "title must be at most {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(QuillError::Validation("content is required".to_string()));
    }
    if content.chars().count() > MAX_CONTENT_LENGTH {
        return Err(QuillError::Validation(format!(
            "content must be at most {MAX_CONTENT_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Service for article operations.
pub struct ArticleService<'a> {
    db: &'a Database,
}

impl<'a> ArticleService<'a> {
    /// Create a new ArticleService.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn repo(&self) -> ArticleRepository<'_> {
        ArticleRepository::new(self.db.pool())
    }

    /// Store a new article and return it with its generated ID.
    pub async fn save(&self, new_article: &NewArticle) -> Result<Article> {
        validate_title(&new_article.title)?;
        validate_content(&new_article.content)?;

        let article = self.repo().insert(new_article).await?;
        info!(article_id = article.id, title = %article.title, "Article created");
        Ok(article)
    }

    /// List every article.
    pub async fn find_all(&self) -> Result<Vec<Article>> {
        self.repo().find_all().await
    }

    /// Get an article by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Article> {
        self.repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound(format!("article {id}")))
    }

    /// Delete an article. Succeeds whether or not the article exists.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if self.repo().delete_by_id(id).await? {
            info!(article_id = id, "Article deleted");
        } else {
            debug!(article_id = id, "Delete of missing article ignored");
        }
        Ok(())
    }

    /// Replace the title and content of an article.
    ///
    /// Concurrent updates are last-writer-wins.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<Article> {
        validate_title(title)?;
        validate_content(content)?;

        let article = self
            .repo()
            .update_with(id, |article| article.update(title, content))
            .await?
            .ok_or_else(|| QuillError::NotFound(format!("article {id}")))?;

        info!(article_id = id, "Article updated");
        Ok(article)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let db = setup().await;
        let service = ArticleService::new(&db);

        let saved = service
            .save(&NewArticle::new("title", "content"))
            .await
            .unwrap();
        let found = service.find_by_id(saved.id).await.unwrap();

        assert_eq!(found.title, "title");
        assert_eq!(found.content, "content");

        let all = service.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_fields() {
        let db = setup().await;
        let service = ArticleService::new(&db);

        let result = service.save(&NewArticle::new("  ", "content")).await;
        assert!(matches!(result, Err(QuillError::Validation(_))));

        let result = service.save(&NewArticle::new("title", "")).await;
        assert!(matches!(result, Err(QuillError::Validation(_))));

        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_rejects_long_title() {
        let db = setup().await;
        let service = ArticleService::new(&db);

        let title = "x".repeat(MAX_TITLE_LENGTH + 1);
        let result = service.save(&NewArticle::new(title, "content")).await;
        assert!(matches!(result, Err(QuillError::Validation(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = setup().await;
        let service = ArticleService::new(&db);

        let result = service.find_by_id(42).await;
        assert!(matches!(result, Err(QuillError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = setup().await;
        let service = ArticleService::new(&db);
        let saved = service.save(&NewArticle::new("t", "c")).await.unwrap();

        service.delete(saved.id).await.unwrap();
        service.delete(saved.id).await.unwrap();
        service.delete(9999).await.unwrap();

        assert!(service.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update() {
        let db = setup().await;
        let service = ArticleService::new(&db);
        let saved = service.save(&NewArticle::new("title", "content")).await.unwrap();

        let updated = service
            .update(saved.id, "new title", "new content")
            .await
            .unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.title, "new title");

        let reloaded = service.find_by_id(saved.id).await.unwrap();
        assert_eq!(reloaded.title, "new title");
        assert_eq!(reloaded.content, "new content");
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let db = setup().await;
        let service = ArticleService::new(&db);

        let result = service.update(5, "title", "content").await;
        assert!(matches!(result, Err(QuillError::NotFound(_))));
    }
}
