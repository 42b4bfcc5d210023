//! Handlers for dynamic attributes.
//!
//! Kind and option-list validity are enforced here, at data-entry time:
//! the resolution engine later assumes stored attributes are well-formed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use adboard_core::catalog::{validate_options, AttributeKind};
use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use adboard_db::models::attribute::{CreateAttribute, UpdateAttribute};
use adboard_db::repositories::{AttributeRepo, CategoryRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories/{id}/attributes
///
/// Attributes owned directly by the category (inherited ones are served
/// by the resolution endpoint).
pub async fn list_attributes(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_category_exists(&state, category_id).await?;

    let attributes = AttributeRepo::list_by_category(&state.pool, category_id).await?;

    Ok(Json(DataResponse { data: attributes }))
}

/// POST /api/v1/categories/{id}/attributes
///
/// Create an attribute owned by the category.
pub async fn create_attribute(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<CreateAttribute>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    ensure_category_exists(&state, category_id).await?;

    let kind = AttributeKind::from_code(&input.kind)?;
    validate_options(kind, input.options.as_deref().unwrap_or(&[]))?;

    let attribute = AttributeRepo::create(&state.pool, category_id, &input).await?;

    tracing::info!(
        attribute_id = attribute.id,
        category_id,
        kind = %attribute.kind,
        "Attribute created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: attribute })))
}

/// GET /api/v1/attributes/{id}
pub async fn get_attribute(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let attribute = AttributeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }))?;

    Ok(Json(DataResponse { data: attribute }))
}

/// PUT /api/v1/attributes/{id}
///
/// Update an attribute. The option list is re-validated against the
/// effective kind (stored or incoming) before anything is written.
pub async fn update_attribute(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAttribute>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let current = AttributeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }))?;

    let kind_code = input.kind.as_deref().unwrap_or(&current.kind);
    let kind = AttributeKind::from_code(kind_code)?;
    let options = input.options.as_deref().unwrap_or(&current.options);
    validate_options(kind, options)?;

    let attribute = AttributeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }))?;

    tracing::info!(attribute_id = id, "Attribute updated");

    Ok(Json(DataResponse { data: attribute }))
}

/// DELETE /api/v1/attributes/{id}
///
/// Delete an attribute; exclusions and action settings referencing it
/// cascade away.
pub async fn delete_attribute(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AttributeRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id,
        }));
    }

    tracing::info!(attribute_id = id, "Attribute deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Verify that a category exists.
async fn ensure_category_exists(state: &AppState, id: DbId) -> AppResult<()> {
    CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id,
        }))
}
