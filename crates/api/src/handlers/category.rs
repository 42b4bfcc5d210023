//! Handlers for the category tree.
//!
//! Structure changes (create, move, delete) rebuild the nested-set bounds
//! inside the repository transaction; `rebuild_tree` exposes the repair
//! operation for bounds that drifted through out-of-band edits.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use adboard_db::models::category::{CreateCategory, UpdateCategory};
use adboard_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Category CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/categories
///
/// List the whole category tree in pre-order.
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a category. The slug must be unique among its siblings.
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = CategoryRepo::create(&state.pool, &input).await?;

    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/{id}
///
/// Rename, re-sort, or move a category (and its subtree) under a new parent.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))?;

    tracing::info!(category_id = id, "Category updated");

    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
///
/// Delete a category. Blocked with 409 while it has children or owns
/// attributes.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = CategoryRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    tracing::info!(category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tree queries
// ---------------------------------------------------------------------------

/// GET /api/v1/categories/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_exists(&state, id).await?;
    let children = CategoryRepo::children(&state.pool, id).await?;

    Ok(Json(DataResponse { data: children }))
}

/// GET /api/v1/categories/{id}/ancestors
///
/// Root → node path, the node itself included.
pub async fn list_ancestors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ancestors = CategoryRepo::ancestors_and_self(&state.pool, id).await?;
    if ancestors.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }));
    }

    Ok(Json(DataResponse { data: ancestors }))
}

/// POST /api/v1/categories/rebuild
///
/// Recompute all nested-set bounds from parent pointers.
pub async fn rebuild_tree(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    CategoryRepo::rebuild(&state.pool).await?;

    tracing::info!("Category tree bounds rebuilt");

    Ok(StatusCode::NO_CONTENT)
}

/// Verify that a category exists.
async fn ensure_exists(state: &AppState, id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
}
