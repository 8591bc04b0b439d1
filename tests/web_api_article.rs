//! Article JSON API tests.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create_test_server, location, signup_and_login};

#[tokio::test]
async fn test_api_requires_session() {
    let (server, _state) = create_test_server().await;

    let response = server.get("/api/articles").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");

    let response = server
        .post("/api/articles")
        .json(&json!({ "title": "t", "content": "c" }))
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_article_crud_flow() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    // Create
    let response = server
        .post("/api/articles")
        .json(&json!({ "title": "Hello", "content": "First post" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let created: Value = response.json();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["title"], "Hello");
    assert_eq!(created["content"], "First post");
    assert!(created["created_at"].is_string());

    // Read one
    let response = server.get(&format!("/api/articles/{id}")).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "title": "Hello", "content": "First post" }));

    // Update
    let response = server
        .put(&format!("/api/articles/{id}"))
        .json(&json!({ "title": "Hello again", "content": "Edited" }))
        .await;
    response.assert_status_ok();
    let updated: Value = response.json();
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Hello again");
    assert_eq!(updated["created_at"], created["created_at"]);

    // List
    let response = server.get("/api/articles").await;
    response.assert_status_ok();
    response.assert_json(&json!([{ "title": "Hello again", "content": "Edited" }]));

    // Delete
    server
        .delete(&format!("/api/articles/{id}"))
        .await
        .assert_status_ok();
    server
        .get(&format!("/api/articles/{id}"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_is_ordered_by_id() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    for title in ["one", "two", "three"] {
        server
            .post("/api/articles")
            .json(&json!({ "title": title, "content": "body" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    let body: Value = server.get("/api/articles").await.json();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}

#[tokio::test]
async fn test_find_missing_article() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    let response = server.get("/api/articles/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "article 999 not found");
}

#[tokio::test]
async fn test_update_missing_article() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    server
        .put("/api/articles/42")
        .json(&json!({ "title": "x", "content": "y" }))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_article_is_ok() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    server.delete("/api/articles/42").await.assert_status_ok();
}

#[tokio::test]
async fn test_create_rejects_blank_fields() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    let response = server
        .post("/api/articles")
        .json(&json!({ "title": "   ", "content": "" }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["title"].is_array());
    assert!(body["error"]["details"]["content"].is_array());

    let list: Value = server.get("/api/articles").await.json();
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_create_rejects_malformed_json() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    let response = server
        .post("/api/articles")
        .json(&json!({ "title": "only a title" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (server, _state) = create_test_server().await;
    signup_and_login(&server).await;

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/articles/{id}"].is_object());
}
