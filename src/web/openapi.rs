//! OpenAPI document for the JSON API.

use axum::Json;
use utoipa::OpenApi;

use super::dto::{AddArticleRequest, ArticleDetailResponse, ArticleResponse, UpdateArticleRequest};
use super::error::{ErrorBody, ErrorCode, ErrorDetail};
use super::handlers::article_api;

/// OpenAPI description of the article endpoints.
#[derive(OpenApi)]
#[openapi(
    info(title = "Quill API", description = "Article CRUD for the Quill blog"),
    paths(
        article_api::add_article,
        article_api::find_all_articles,
        article_api::find_article,
        article_api::update_article,
        article_api::delete_article,
    ),
    components(schemas(
        AddArticleRequest,
        UpdateArticleRequest,
        ArticleResponse,
        ArticleDetailResponse,
        ErrorBody,
        ErrorDetail,
        ErrorCode,
    )),
    tags((name = "articles", description = "Blog articles"))
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json - Serve the OpenAPI document.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
