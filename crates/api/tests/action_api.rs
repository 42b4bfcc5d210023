//! HTTP-level integration tests for action, binding, and setting endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, bind_action, create_action, create_attribute, create_category, delete, get,
    post_json, put_json,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Action CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_action_returns_201(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/actions",
        serde_json::json!({ "name": "Sell", "slug": "sell" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["slug"], "sell");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_action_slug_returns_409(pool: PgPool) {
    create_action(&pool, "Sell", "sell").await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/actions",
        serde_json::json!({ "name": "Sell Again", "slug": "sell" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn actions_are_listed_by_name(pool: PgPool) {
    create_action(&pool, "Sell", "sell").await;
    create_action(&pool, "Rent", "rent").await;

    let json = body_json(get(common::build_test_app(pool), "/api/v1/actions").await).await;
    let names: Vec<String> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Rent".to_string(), "Sell".to_string()]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_action_returns_204(pool: PgPool) {
    let id = create_action(&pool, "Sell", "sell").await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Category bindings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn bind_category_is_upsert(pool: PgPool) {
    let category = create_category(&pool, "Vehicles", "vehicles", None).await;
    let action = create_action(&pool, "Sell", "sell").await;

    bind_action(&pool, action, category, 1, false).await;
    // Second PUT on the same pair updates instead of conflicting.
    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/actions/{action}/categories/{category}"),
        serde_json::json!({ "sort": 5, "excluded": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["sort"], 5);
    assert_eq!(json["data"]["excluded"], true);

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/actions/{action}/categories"),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn binding_unknown_category_returns_404(pool: PgPool) {
    let action = create_action(&pool, "Sell", "sell").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{action}/categories/999999"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unbind_category_returns_204(pool: PgPool) {
    let category = create_category(&pool, "Vehicles", "vehicles", None).await;
    let action = create_action(&pool, "Sell", "sell").await;
    bind_action(&pool, action, category, 0, false).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{action}/categories/{category}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

// ---------------------------------------------------------------------------
// Attribute settings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn upsert_setting_stores_flags(pool: PgPool) {
    let category = create_category(&pool, "Vehicles", "vehicles", None).await;
    let attribute = create_attribute(
        &pool,
        category,
        "Color",
        "select",
        serde_json::json!(["red"]),
    )
    .await;
    let action = create_action(&pool, "Sell", "sell").await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/actions/{action}/attributes/{attribute}"),
        serde_json::json!({ "required": true, "is_column": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["required"], true);
    assert_eq!(json["data"]["is_column"], true);
    assert_eq!(json["data"]["excluded"], false);

    // Upsert replaces the flags wholesale.
    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{action}/attributes/{attribute}"),
        serde_json::json!({ "excluded": true }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["required"], false);
    assert_eq!(json["data"]["excluded"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn setting_for_unknown_attribute_returns_404(pool: PgPool) {
    let action = create_action(&pool, "Sell", "sell").await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{action}/attributes/999999"),
        serde_json::json!({ "required": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_setting_returns_204(pool: PgPool) {
    let category = create_category(&pool, "Vehicles", "vehicles", None).await;
    let attribute = create_attribute(
        &pool,
        category,
        "Color",
        "select",
        serde_json::json!(["red"]),
    )
    .await;
    let action = create_action(&pool, "Sell", "sell").await;
    common::set_attribute_setting(&pool, action, attribute, true, false, false).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/actions/{action}/attributes/{attribute}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
