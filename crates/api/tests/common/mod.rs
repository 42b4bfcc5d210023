//! Shared helpers for HTTP-level integration tests.
//!
//! Tests drive the real router through `tower::ServiceExt::oneshot`, so
//! the full middleware stack (CORS, request ID, timeout, panic recovery)
//! is exercised without a TCP listener.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use adboard_api::config::ServerConfig;
use adboard_api::router::build_app_router;
use adboard_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors the production construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a POST request with an empty body.
pub async fn post_empty(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, json: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Send a DELETE request.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
    .expect("response")
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("valid JSON body")
}

// ---------------------------------------------------------------------------
// Fixture builders (all via the public API)
// ---------------------------------------------------------------------------

/// Create a category and return its id.
pub async fn create_category(
    pool: &PgPool,
    name: &str,
    slug: &str,
    parent_id: Option<i64>,
) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/categories",
        serde_json::json!({ "name": name, "slug": slug, "parent_id": parent_id }),
    )
    .await;
    assert_eq!(response.status(), 201, "category fixture failed");
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("category id")
}

/// Create an attribute under a category and return its id.
pub async fn create_attribute(
    pool: &PgPool,
    category_id: i64,
    name: &str,
    kind: &str,
    options: serde_json::Value,
) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/categories/{category_id}/attributes"),
        serde_json::json!({ "name": name, "kind": kind, "options": options }),
    )
    .await;
    assert_eq!(response.status(), 201, "attribute fixture failed");
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("attribute id")
}

/// Create an action and return its id.
pub async fn create_action(pool: &PgPool, name: &str, slug: &str) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/actions",
        serde_json::json!({ "name": name, "slug": slug }),
    )
    .await;
    assert_eq!(response.status(), 201, "action fixture failed");
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("action id")
}

/// Bind an action to a category.
pub async fn bind_action(
    pool: &PgPool,
    action_id: i64,
    category_id: i64,
    sort: i32,
    excluded: bool,
) {
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/actions/{action_id}/categories/{category_id}"),
        serde_json::json!({ "sort": sort, "excluded": excluded }),
    )
    .await;
    assert_eq!(response.status(), 200, "binding fixture failed");
}

/// Upsert an (action, attribute) override setting.
pub async fn set_attribute_setting(
    pool: &PgPool,
    action_id: i64,
    attribute_id: i64,
    required: bool,
    is_column: bool,
    excluded: bool,
) {
    let response = put_json(
        build_test_app(pool.clone()),
        &format!("/api/v1/actions/{action_id}/attributes/{attribute_id}"),
        serde_json::json!({
            "required": required,
            "is_column": is_column,
            "excluded": excluded,
        }),
    )
    .await;
    assert_eq!(response.status(), 200, "setting fixture failed");
}
