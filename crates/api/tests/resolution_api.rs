//! HTTP-level integration tests for the resolution and validation
//! endpoints, exercising attribute inheritance, action overrides, and
//! exclusions end to end.

mod common;

use axum::http::StatusCode;
use common::{
    bind_action, body_json, create_action, create_attribute, create_category, get, post_json,
    set_attribute_setting,
};
use sqlx::PgPool;

/// Vehicles (root, owns Color) → Cars (leaf). Returns (root, cars, color).
async fn vehicles_fixture(pool: &PgPool) -> (i64, i64, i64) {
    let root = create_category(pool, "Vehicles", "vehicles", None).await;
    let cars = create_category(pool, "Cars", "cars", Some(root)).await;
    let color = create_attribute(
        pool,
        root,
        "Color",
        "select",
        serde_json::json!(["red", "blue", "green"]),
    )
    .await;
    (root, cars, color)
}

fn visible_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]["resolution"]["visible"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect()
}

fn required_ids(json: &serde_json::Value) -> Vec<i64> {
    json["data"]["resolution"]["required"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Attribute resolution
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn leaf_inherits_ancestor_attribute(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{cars}/resolution"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(visible_ids(&json), vec![color]);
    assert!(required_ids(&json).is_empty());
    // Rules are derived for every visible attribute.
    assert_eq!(json["data"]["rules"][color.to_string()]["presence"], "nullable");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolution_for_non_leaf_returns_400(pool: PgPool) {
    let (root, _, _) = vehicles_fixture(&pool).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{root}/resolution"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolution_for_unknown_category_returns_404(pool: PgPool) {
    let response = get(
        common::build_test_app(pool),
        "/api/v1/categories/999999/resolution",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn action_setting_marks_attribute_required(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    bind_action(&pool, sell, cars, 0, false).await;
    set_attribute_setting(&pool, sell, color, true, false, false).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/resolution?action_id={sell}"),
        )
        .await,
    )
    .await;
    assert_eq!(required_ids(&json), vec![color]);
    assert_eq!(json["data"]["rules"][color.to_string()]["presence"], "required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn without_action_nothing_is_required(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    set_attribute_setting(&pool, sell, color, true, false, false).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/resolution"),
        )
        .await,
    )
    .await;
    assert!(required_ids(&json).is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn action_exclusion_overrides_required(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    // required and excluded set together: exclusion must win.
    set_attribute_setting(&pool, sell, color, true, true, true).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/resolution?action_id={sell}"),
        )
        .await,
    )
    .await;
    assert!(visible_ids(&json).is_empty());
    assert!(required_ids(&json).is_empty());
    assert_eq!(
        json["data"]["resolution"]["excluded_by_action"],
        serde_json::json!([color])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inherited_exclusion_removes_attribute(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{cars}/exclusions"),
        serde_json::json!({ "attribute_id": color }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/resolution"),
        )
        .await,
    )
    .await;
    assert!(visible_ids(&json).is_empty());
    assert_eq!(
        json["data"]["resolution"]["available"],
        serde_json::json!([])
    );
}

// ---------------------------------------------------------------------------
// Adjusted actions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn actions_inherited_from_root_binding(pool: PgPool) {
    let (root, cars, _) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    bind_action(&pool, sell, root, 0, false).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/actions"),
        )
        .await,
    )
    .await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![sell]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn closer_excluded_binding_hides_inherited_action(pool: PgPool) {
    let (root, cars, _) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    let rent = create_action(&pool, "Rent", "rent").await;
    bind_action(&pool, sell, root, 0, false).await;
    bind_action(&pool, rent, root, 1, false).await;
    // Rent is switched off for Cars specifically.
    bind_action(&pool, rent, cars, 1, true).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/actions"),
        )
        .await,
    )
    .await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![sell]);
}

// ---------------------------------------------------------------------------
// Submission validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_attribute_fails_validation(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    set_attribute_setting(&pool, sell, color, true, false, false).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{cars}/validate?action_id={sell}"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["is_valid"], false);
    assert_eq!(json["data"]["errors"][0]["check"], "required");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn valid_submission_passes(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;
    let sell = create_action(&pool, "Sell", "sell").await;
    set_attribute_setting(&pool, sell, color, true, false, false).await;

    let mut payload = serde_json::Map::new();
    payload.insert(format!("attr_{color}"), serde_json::json!("red"));
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{cars}/validate?action_id={sell}"),
        serde_json::Value::Object(payload),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["is_valid"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_options_value_fails_validation(pool: PgPool) {
    let (_, cars, color) = vehicles_fixture(&pool).await;

    let mut payload = serde_json::Map::new();
    payload.insert(format!("attr_{color}"), serde_json::json!("purple"));
    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{cars}/validate"),
        serde_json::Value::Object(payload),
    )
    .await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["is_valid"], false);
    assert_eq!(json["data"]["errors"][0]["check"], "one_of");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn non_object_payload_returns_400(pool: PgPool) {
    let (_, cars, _) = vehicles_fixture(&pool).await;

    let response = post_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{cars}/validate"),
        serde_json::json!(["not", "an", "object"]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
