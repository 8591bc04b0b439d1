//! Request DTOs for the JSON API and HTML forms.

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::validation::{not_empty_trimmed, single_line_text};
use crate::article::NewArticle;

/// Body of `POST /api/articles`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddArticleRequest {
    /// Article title.
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "single_line_text")
    )]
    pub title: String,
    /// Article body.
    #[validate(
        length(min = 1, max = 50000, message = "Content must be 1-50000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
}

impl AddArticleRequest {
    /// Build the record to insert.
    pub fn to_new_article(&self) -> NewArticle {
        NewArticle::new(self.title.clone(), self.content.clone())
    }
}

/// Body of `PUT /api/articles/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateArticleRequest {
    /// New title.
    #[validate(
        length(min = 1, max = 200, message = "Title must be 1-200 characters"),
        custom(function = "single_line_text")
    )]
    pub title: String,
    /// New body.
    #[validate(
        length(min = 1, max = 50000, message = "Content must be 1-50000 characters"),
        custom(function = "not_empty_trimmed")
    )]
    pub content: String,
}

/// Form posted to `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Login email; the form field may also be called `username`.
    #[serde(alias = "username")]
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Form posted to `POST /user`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddUserRequest {
    /// Login email.
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

/// Query string of `GET /new-article`.
#[derive(Debug, Default, Deserialize)]
pub struct NewArticleQuery {
    /// Article to edit; absent when writing a new article.
    pub id: Option<i64>,
}

/// Query string of `GET /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginPageQuery {
    /// Present after a failed login; `locked` after a lockout.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_article_request_valid() {
        let request = AddArticleRequest {
            title: "title".to_string(),
            content: "content".to_string(),
        };
        assert!(request.validate().is_ok());

        let new_article = request.to_new_article();
        assert_eq!(new_article, NewArticle::new("title", "content"));
    }

    #[test]
    fn test_add_article_request_blank_title() {
        let request = AddArticleRequest {
            title: "   ".to_string(),
            content: "content".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn test_update_article_request_empty_content() {
        let request = UpdateArticleRequest {
            title: "title".to_string(),
            content: String::new(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("content"));
    }

    #[test]
    fn test_login_form_username_alias() {
        let form: LoginForm =
            serde_json::from_str(r#"{"username":"a@example.com","password":"pw"}"#).unwrap();
        assert_eq!(form.email, "a@example.com");
    }

    #[test]
    fn test_add_user_request_validation() {
        let ok = AddUserRequest {
            email: "writer@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = AddUserRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }
}
