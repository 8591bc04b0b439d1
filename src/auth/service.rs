//! User service for Quill.
//!
//! Signup and credential checks on top of [`UserRepository`]. Plaintext
//! passwords never leave this module unhashed.

use tracing::{info, warn};

use super::password::PasswordHasher;
use super::repository::UserRepository;
use super::user::{normalize_email, NewUser, User};
use crate::db::Database;
use crate::{QuillError, Result};

/// Validate an email address for signup.
fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(QuillError::Validation("email is required".to_string()));
    }
    if !email.contains('@') {
        return Err(QuillError::Validation(format!("invalid email: {email}")));
    }
    Ok(())
}

/// Service for user operations.
pub struct UserService<'a> {
    db: &'a Database,
    hasher: &'a PasswordHasher,
}

impl<'a> UserService<'a> {
    /// Create a new UserService.
    pub fn new(db: &'a Database, hasher: &'a PasswordHasher) -> Self {
        Self { db, hasher }
    }

    /// Register a new user and return its ID.
    ///
    /// The email is stored normalized. Fails with [`QuillError::Conflict`]
    /// when the email is taken, whatever its case.
    pub async fn save(&self, email: &str, password: &str) -> Result<i64> {
        let email = normalize_email(email);
        validate_email(&email)?;
        let hash = self
            .hasher
            .hash(password)
            .map_err(|e| QuillError::Validation(e.to_string()))?;

        let repo = UserRepository::new(self.db.pool());
        let user = match repo.create(&NewUser::new(email.as_str(), hash)).await {
            Ok(user) => user,
            Err(QuillError::Conflict(_)) => {
                warn!(email = %email, "Signup rejected: email already registered");
                return Err(QuillError::Conflict(format!(
                    "email already registered: {email}"
                )));
            }
            Err(e) => return Err(e),
        };

        info!(user_id = user.id, email = %user.email, "User registered");
        Ok(user.id)
    }

    /// Load a user by email.
    pub async fn load_user_by_email(&self, email: &str) -> Result<User> {
        let email = normalize_email(email);
        UserRepository::new(self.db.pool())
            .find_by_email(&email)
            .await?
            .ok_or_else(|| QuillError::NotFound(format!("user {email}")))
    }

    /// Check an email and password pair.
    ///
    /// Unknown emails and wrong passwords both yield the same
    /// [`QuillError::Auth`] error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let user = match self.load_user_by_email(email).await {
            Ok(user) => user,
            Err(QuillError::NotFound(_)) => {
                return Err(QuillError::Auth("invalid credentials".to_string()))
            }
            Err(e) => return Err(e),
        };

        self.hasher
            .verify(password, &user.password)
            .map_err(|_| QuillError::Auth("invalid credentials".to_string()))?;

        Ok(user)
    }
}
