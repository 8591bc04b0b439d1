//! Article handlers for the JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::article::ArticleService;
use crate::web::dto::{
    AddArticleRequest, ArticleDetailResponse, ArticleResponse, UpdateArticleRequest,
    ValidatedJson,
};
use crate::web::error::{ApiError, ErrorBody};
use crate::web::handlers::AppState;

/// POST /api/articles - Create an article.
#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "articles",
    request_body = AddArticleRequest,
    responses(
        (status = 201, description = "Article created", body = ArticleDetailResponse),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn add_article(
    State(state): State<Arc<AppState>>,
    ValidatedJson(request): ValidatedJson<AddArticleRequest>,
) -> Result<(StatusCode, Json<ArticleDetailResponse>), ApiError> {
    let article = ArticleService::new(&state.db)
        .save(&request.to_new_article())
        .await?;

    Ok((StatusCode::CREATED, Json(article.into())))
}

/// GET /api/articles - List all articles.
#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    responses(
        (status = 200, description = "All articles", body = Vec<ArticleResponse>)
    )
)]
pub async fn find_all_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArticleResponse>>, ApiError> {
    let articles = ArticleService::new(&state.db).find_all().await?;

    Ok(Json(articles.into_iter().map(ArticleResponse::from).collect()))
}

/// GET /api/articles/{id} - Get one article.
#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "The article", body = ArticleResponse),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn find_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = ArticleService::new(&state.db).find_by_id(id).await?;

    Ok(Json(article.into()))
}

/// PUT /api/articles/{id} - Replace title and content.
#[utoipa::path(
    put,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article ID")),
    request_body = UpdateArticleRequest,
    responses(
        (status = 200, description = "Updated article", body = ArticleDetailResponse),
        (status = 404, description = "No such article", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorBody)
    )
)]
pub async fn update_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UpdateArticleRequest>,
) -> Result<Json<ArticleDetailResponse>, ApiError> {
    let article = ArticleService::new(&state.db)
        .update(id, &request.title, &request.content)
        .await?;

    Ok(Json(article.into()))
}

/// DELETE /api/articles/{id} - Delete an article.
///
/// Deleting a missing article also answers 200.
#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    tag = "articles",
    params(("id" = i64, Path, description = "Article ID")),
    responses(
        (status = 200, description = "Article deleted (or already absent)")
    )
)]
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    ArticleService::new(&state.db).delete(id).await?;

    Ok(StatusCode::OK)
}
