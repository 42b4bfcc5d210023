//! Handlers for the region tree. Mirrors the category handlers without
//! the attribute catalog.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use adboard_db::models::region::{CreateRegion, UpdateRegion};
use adboard_db::repositories::RegionRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/regions
pub async fn list_regions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let regions = RegionRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: regions }))
}

/// POST /api/v1/regions
pub async fn create_region(
    State(state): State<AppState>,
    Json(input): Json<CreateRegion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let region = RegionRepo::create(&state.pool, &input).await?;

    tracing::info!(region_id = region.id, slug = %region.slug, "Region created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: region })))
}

/// GET /api/v1/regions/{id}
pub async fn get_region(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let region = RegionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }))?;

    Ok(Json(DataResponse { data: region }))
}

/// PUT /api/v1/regions/{id}
pub async fn update_region(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRegion>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let region = RegionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }))?;

    tracing::info!(region_id = id, "Region updated");

    Ok(Json(DataResponse { data: region }))
}

/// DELETE /api/v1/regions/{id}
///
/// Blocked with 409 while the region has children.
pub async fn delete_region(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = RegionRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }));
    }

    tracing::info!(region_id = id, "Region deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/regions/{id}/children
pub async fn list_children(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    RegionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }))?;
    let children = RegionRepo::children(&state.pool, id).await?;

    Ok(Json(DataResponse { data: children }))
}

/// GET /api/v1/regions/{id}/ancestors
pub async fn list_ancestors(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ancestors = RegionRepo::ancestors_and_self(&state.pool, id).await?;
    if ancestors.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Region",
            id,
        }));
    }

    Ok(Json(DataResponse { data: ancestors }))
}

/// POST /api/v1/regions/rebuild
pub async fn rebuild_tree(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    RegionRepo::rebuild(&state.pool).await?;

    tracing::info!("Region tree bounds rebuilt");

    Ok(StatusCode::NO_CONTENT)
}
