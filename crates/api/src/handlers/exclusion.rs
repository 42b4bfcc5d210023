//! Handlers for inherited-attribute exclusions.
//!
//! An exclusion only makes sense when the attribute's owning category is
//! a strict ancestor of the excluding category; both directions of that
//! rule are enforced here before the pair is stored.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use adboard_db::models::exclusion::CreateExclusion;
use adboard_db::repositories::{AttributeRepo, CategoryRepo, ExclusionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories/{id}/exclusions
pub async fn list_exclusions(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ancestry = CategoryRepo::ancestors_and_self(&state.pool, category_id).await?;
    if ancestry.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }));
    }

    let exclusions = ExclusionRepo::list_for_category(&state.pool, category_id).await?;

    Ok(Json(DataResponse { data: exclusions }))
}

/// POST /api/v1/categories/{id}/exclusions
///
/// Mark an ancestor-owned attribute as not inherited by this category.
pub async fn add_exclusion(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<CreateExclusion>,
) -> AppResult<impl IntoResponse> {
    let ancestry = CategoryRepo::ancestors_and_self(&state.pool, category_id).await?;
    if ancestry.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }));
    }

    let attribute = AttributeRepo::find_by_id(&state.pool, input.attribute_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id: input.attribute_id,
        }))?;

    if attribute.category_id == category_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Attribute {} is owned by category {category_id} itself; only inherited attributes can be excluded",
            attribute.id
        ))));
    }
    if !ancestry.iter().any(|c| c.id == attribute.category_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Attribute {} is not inherited from an ancestor of category {category_id}",
            attribute.id
        ))));
    }

    let exclusion = ExclusionRepo::add(&state.pool, category_id, input.attribute_id).await?;

    tracing::info!(
        category_id,
        attribute_id = input.attribute_id,
        "Inherited attribute excluded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: exclusion })))
}

/// DELETE /api/v1/categories/{id}/exclusions/{attribute_id}
pub async fn remove_exclusion(
    State(state): State<AppState>,
    Path((category_id, attribute_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = ExclusionRepo::remove(&state.pool, category_id, attribute_id).await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Exclusion",
            id: attribute_id,
        }));
    }

    tracing::info!(category_id, attribute_id, "Exclusion removed");

    Ok(StatusCode::NO_CONTENT)
}
