//! HTTP-level integration tests for the category tree endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_attribute, create_category, delete, get, post_empty, post_json, put_json};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Category CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_category_returns_201_with_bounds(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/categories",
        serde_json::json!({ "name": "Vehicles", "slug": "vehicles" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Vehicles");
    assert_eq!(json["data"]["slug"], "vehicles");
    // A lone root spans exactly one lft/rgt pair.
    assert_eq!(json["data"]["lft"], 1);
    assert_eq!(json["data"]["rgt"], 2);
    assert_eq!(json["data"]["depth"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn child_creation_updates_parent_bounds(pool: PgPool) {
    let root = create_category(&pool, "Vehicles", "vehicles", None).await;
    create_category(&pool, "Cars", "cars", Some(root)).await;

    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{root}"),
    )
    .await;
    let json = body_json(response).await;
    // Root now wraps the child: [1, 4].
    assert_eq!(json["data"]["lft"], 1);
    assert_eq!(json["data"]["rgt"], 4);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_sibling_slug_returns_409(pool: PgPool) {
    create_category(&pool, "Vehicles", "vehicles", None).await;

    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/categories",
        serde_json::json!({ "name": "Vehicles Again", "slug": "vehicles" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn same_slug_under_different_parents_is_allowed(pool: PgPool) {
    let vehicles = create_category(&pool, "Vehicles", "vehicles", None).await;
    let property = create_category(&pool, "Property", "property", None).await;

    create_category(&pool, "Other", "other", Some(vehicles)).await;
    create_category(&pool, "Other", "other", Some(property)).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_slug_returns_400(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/categories",
        serde_json::json!({ "name": "Bad", "slug": "Not A Slug!" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_category_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/categories/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_category_renames(pool: PgPool) {
    let id = create_category(&pool, "Vehicles", "vehicles", None).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{id}"),
        serde_json::json!({ "name": "All Vehicles" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "All Vehicles");
    assert_eq!(json["data"]["slug"], "vehicles");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moving_category_under_own_subtree_returns_400(pool: PgPool) {
    let root = create_category(&pool, "Vehicles", "vehicles", None).await;
    let child = create_category(&pool, "Cars", "cars", Some(root)).await;

    let response = put_json(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{root}"),
        serde_json::json!({ "parent_id": child }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn moving_subtree_recomputes_depths(pool: PgPool) {
    let vehicles = create_category(&pool, "Vehicles", "vehicles", None).await;
    let property = create_category(&pool, "Property", "property", None).await;
    let cars = create_category(&pool, "Cars", "cars", Some(vehicles)).await;

    let response = put_json(
        common::build_test_app(pool.clone()),
        &format!("/api/v1/categories/{cars}"),
        serde_json::json!({ "parent_id": property }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{cars}/ancestors"),
        )
        .await,
    )
    .await;
    let path: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(path, vec![property, cars]);
}

// ---------------------------------------------------------------------------
// Delete policy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_leaf_category_returns_204(pool: PgPool) {
    let id = create_category(&pool, "Vehicles", "vehicles", None).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_category_with_children_returns_409(pool: PgPool) {
    let root = create_category(&pool, "Vehicles", "vehicles", None).await;
    create_category(&pool, "Cars", "cars", Some(root)).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{root}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_category_owning_attributes_returns_409(pool: PgPool) {
    let id = create_category(&pool, "Vehicles", "vehicles", None).await;
    create_attribute(&pool, id, "Color", "select", serde_json::json!(["red", "blue"])).await;

    let response = delete(
        common::build_test_app(pool),
        &format!("/api/v1/categories/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Tree queries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn children_are_listed_in_sibling_order(pool: PgPool) {
    let root = create_category(&pool, "Vehicles", "vehicles", None).await;
    let bikes = create_category(&pool, "Bikes", "bikes", Some(root)).await;
    let cars = create_category(&pool, "Cars", "cars", Some(root)).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{root}/children"),
        )
        .await,
    )
    .await;
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    // Equal sort: name breaks the tie.
    assert_eq!(ids, vec![bikes, cars]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ancestors_run_root_to_leaf(pool: PgPool) {
    let root = create_category(&pool, "Vehicles", "vehicles", None).await;
    let cars = create_category(&pool, "Cars", "cars", Some(root)).await;
    let coupes = create_category(&pool, "Coupes", "coupes", Some(cars)).await;

    let json = body_json(
        get(
            common::build_test_app(pool),
            &format!("/api/v1/categories/{coupes}/ancestors"),
        )
        .await,
    )
    .await;
    let path: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(path, vec![root, cars, coupes]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rebuild_endpoint_returns_204(pool: PgPool) {
    create_category(&pool, "Vehicles", "vehicles", None).await;

    let response = post_empty(common::build_test_app(pool), "/api/v1/categories/rebuild").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}
