//! Article repository for Quill.

use chrono::Utc;

use super::model::{Article, NewArticle};
use crate::db::DbPool;
use crate::{QuillError, Result};

const SELECT_ARTICLE: &str = "SELECT id, title, content, created_at, updated_at FROM articles";

/// Repository for article persistence.
pub struct ArticleRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new ArticleRepository with the given database pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Insert a new article. Both timestamps are set to the current time.
    pub async fn insert(&self, new_article: &NewArticle) -> Result<Article> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO articles (title, content, created_at, updated_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_article.title)
        .bind(&new_article.content)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::NotFound(format!("article {id}")))
    }

    /// List every article in ascending ID order.
    pub async fn find_all(&self) -> Result<Vec<Article>> {
        let articles = sqlx::query_as::<_, Article>(&format!("{SELECT_ARTICLE} ORDER BY id"))
            .fetch_all(self.pool)
            .await?;
        Ok(articles)
    }

    /// Get an article by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Article>> {
        let article = sqlx::query_as::<_, Article>(&format!("{SELECT_ARTICLE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(article)
    }

    /// Delete an article by ID. Deleting a missing ID is not an error.
    ///
    /// Returns true if a row was removed.
    pub async fn delete_by_id(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Load an article, mutate it and write it back in one transaction.
    ///
    /// The ID and creation time are never written back. Returns `None`
    /// without calling `mutate` when the article does not exist. Concurrent
    /// updates of one article are serialized; the last one to commit wins.
    pub async fn update_with<F>(&self, id: i64, mutate: F) -> Result<Option<Article>>
    where
        F: FnOnce(&mut Article),
    {
        let mut tx = self.pool.begin().await?;

        // Take the write lock before reading. A read-then-write transaction
        // fails with SQLITE_BUSY when another writer got there first, while
        // a leading write waits on busy_timeout.
        let claimed = sqlx::query("UPDATE articles SET updated_at = updated_at WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if claimed.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let article = sqlx::query_as::<_, Article>(&format!("{SELECT_ARTICLE} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(mut article) = article else {
            tx.rollback().await?;
            return Ok(None);
        };

        mutate(&mut article);
        article.id = id;

        sqlx::query("UPDATE articles SET title = ?, content = ?, updated_at = ? WHERE id = ?")
            .bind(&article.title)
            .bind(&article.content)
            .bind(article.updated_at)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(article))
    }

    /// Count stored articles.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM articles")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }

    /// Delete every article. Returns the number of rows removed.
    pub async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM articles")
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_article() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());

        let article = repo
            .insert(&NewArticle::new("title", "content"))
            .await
            .unwrap();

        assert!(article.id > 0);
        assert_eq!(article.title, "title");
        assert_eq!(article.content, "content");
        assert_eq!(article.created_at, article.updated_at);
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_all_in_id_order() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());

        assert!(repo.find_all().await.unwrap().is_empty());

        for i in 1..=3 {
            repo.insert(&NewArticle::new(format!("title {i}"), format!("content {i}")))
                .await
                .unwrap();
        }

        let articles = repo.find_all().await.unwrap();
        assert_eq!(articles.len(), 3);
        assert_eq!(articles[0].title, "title 1");
        assert_eq!(articles[2].title, "title 3");
        assert!(articles.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_find_by_id_missing() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());

        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());
        let article = repo.insert(&NewArticle::new("t", "c")).await.unwrap();

        assert!(repo.delete_by_id(article.id).await.unwrap());
        assert!(repo.find_by_id(article.id).await.unwrap().is_none());
        assert!(!repo.delete_by_id(article.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_store_unchanged() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());
        repo.insert(&NewArticle::new("keep", "me")).await.unwrap();

        assert!(!repo.delete_by_id(12345).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_with() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());
        let original = repo.insert(&NewArticle::new("old", "old body")).await.unwrap();

        let updated = repo
            .update_with(original.id, |a| a.update("new", "new body"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.title, "new");
        assert!(updated.updated_at >= original.updated_at);

        let reloaded = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(reloaded.title, "new");
        assert_eq!(reloaded.content, "new body");
        assert_eq!(reloaded.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_with_cannot_change_id() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());
        let original = repo.insert(&NewArticle::new("t", "c")).await.unwrap();

        let updated = repo
            .update_with(original.id, |a| {
                a.id = 999;
                a.update("t2", "c2");
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_with_missing() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());

        let mut called = false;
        let result = repo
            .update_with(7, |_| called = true)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(!called);
    }

    #[tokio::test]
    async fn test_delete_all() {
        let db = setup_db().await;
        let repo = ArticleRepository::new(db.pool());
        repo.insert(&NewArticle::new("a", "1")).await.unwrap();
        repo.insert(&NewArticle::new("b", "2")).await.unwrap();

        assert_eq!(repo.delete_all().await.unwrap(), 2);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_updates_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(dir.path().join("quill.db")).await.unwrap();
        let id = ArticleRepository::new(db.pool())
            .insert(&NewArticle::new("start", "body"))
            .await
            .unwrap()
            .id;

        let handles: Vec<_> = (0..40)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move {
                    ArticleRepository::new(db.pool())
                        .update_with(id, |a| a.update(format!("title {i}"), format!("body {i}")))
                        .await
                })
            })
            .collect();

        let mut failures = Vec::new();
        for handle in handles {
            match handle.await.unwrap() {
                Ok(Some(_)) => {}
                Ok(None) => failures.push("article vanished".to_string()),
                Err(e) => failures.push(e.to_string()),
            }
        }
        assert!(failures.is_empty(), "failed updates: {failures:?}");

        let article = ArticleRepository::new(db.pool())
            .find_by_id(id)
            .await
            .unwrap()
            .unwrap();
        let n = article.title.strip_prefix("title ").unwrap();
        assert_eq!(article.content, format!("body {n}"));

        db.close().await;
    }
}
