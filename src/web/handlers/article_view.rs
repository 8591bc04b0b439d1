//! HTML pages for browsing and editing articles.

use axum::{
    extract::{Path, Query, State},
    response::{Html, Redirect},
    Extension,
};
use std::sync::Arc;

use crate::article::ArticleService;
use crate::template::{TemplateContext, Value};
use crate::web::dto::{ArticleListViewResponse, ArticleViewResponse, NewArticleQuery};
use crate::web::error::ViewError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// Context shared by every signed-in page.
fn page_context(title: impl Into<String>, user: &CurrentUser) -> TemplateContext {
    let mut context = TemplateContext::new();
    context.set("page_title", title.into());
    context.set("current_user", user.email.as_str());
    context
}

fn article_value(state: &AppState, article: &ArticleViewResponse) -> Result<Value, ViewError> {
    Value::from_serialize(article).map_err(|e| state.view_error(e.into()))
}

/// GET / - Send visitors to the article list.
pub async fn root_redirect() -> Redirect {
    Redirect::to("/articles")
}

/// GET /articles - Article list page.
pub async fn articles_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Html<String>, ViewError> {
    let articles: Vec<ArticleListViewResponse> = ArticleService::new(&state.db)
        .find_all()
        .await
        .map_err(|e| state.view_error(e))?
        .into_iter()
        .map(ArticleListViewResponse::from)
        .collect();

    let mut context = page_context("Articles", &user);
    context.set(
        "articles",
        Value::from_serialize(&articles).map_err(|e| state.view_error(e.into()))?,
    );

    state.render("article_list", &context)
}

/// GET /articles/{id} - Article detail page.
pub async fn article_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Html<String>, ViewError> {
    let article = ArticleService::new(&state.db)
        .find_by_id(id)
        .await
        .map_err(|e| state.view_error(e))?;
    let view = ArticleViewResponse::from(article);

    let mut context = page_context(view.title.clone(), &user);
    context.set("article", article_value(&state, &view)?);

    state.render("article", &context)
}

/// GET /new-article?id= - Editor page, empty when `id` is absent.
pub async fn new_article_page(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<NewArticleQuery>,
) -> Result<Html<String>, ViewError> {
    let view = match query.id {
        Some(id) => ArticleService::new(&state.db)
            .find_by_id(id)
            .await
            .map(ArticleViewResponse::from)
            .map_err(|e| state.view_error(e))?,
        None => ArticleViewResponse::default(),
    };

    let title = if view.id.is_some() { "Edit article" } else { "New article" };
    let mut context = page_context(title, &user);
    context.set("article", article_value(&state, &view)?);

    state.render("new_article", &context)
}
