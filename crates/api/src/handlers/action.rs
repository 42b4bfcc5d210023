//! Handlers for actions, their category bindings, and their per-attribute
//! override settings.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use adboard_db::models::action::{
    BindActionCategory, CreateAction, UpdateAction, UpsertAttributeSetting,
};
use adboard_db::repositories::{ActionRepo, AttributeRepo, CategoryRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Action CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/actions
pub async fn list_actions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let actions = ActionRepo::list_all(&state.pool).await?;

    Ok(Json(DataResponse { data: actions }))
}

/// POST /api/v1/actions
pub async fn create_action(
    State(state): State<AppState>,
    Json(input): Json<CreateAction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let action = ActionRepo::create(&state.pool, &input).await?;

    tracing::info!(action_id = action.id, slug = %action.slug, "Action created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: action })))
}

/// GET /api/v1/actions/{id}
pub async fn get_action(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let action = ensure_action_exists(&state, id).await?;

    Ok(Json(DataResponse { data: action }))
}

/// PUT /api/v1/actions/{id}
pub async fn update_action(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAction>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let action = ActionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id,
        }))?;

    tracing::info!(action_id = id, "Action updated");

    Ok(Json(DataResponse { data: action }))
}

/// DELETE /api/v1/actions/{id}
///
/// Delete an action; bindings and settings cascade away with it.
pub async fn delete_action(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ActionRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id,
        }));
    }

    tracing::info!(action_id = id, "Action deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Category bindings
// ---------------------------------------------------------------------------

/// GET /api/v1/actions/{id}/categories
pub async fn list_bindings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_action_exists(&state, id).await?;

    let bindings = ActionRepo::list_bindings_for_action(&state.pool, id).await?;

    Ok(Json(DataResponse { data: bindings }))
}

/// PUT /api/v1/actions/{id}/categories/{category_id}
///
/// Bind the action to a category subtree, or update the binding's
/// sort/excluded flags. Upsert semantics.
pub async fn bind_category(
    State(state): State<AppState>,
    Path((action_id, category_id)): Path<(DbId, DbId)>,
    Json(input): Json<BindActionCategory>,
) -> AppResult<impl IntoResponse> {
    ensure_action_exists(&state, action_id).await?;
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    let binding = ActionRepo::bind_category(&state.pool, action_id, category_id, &input).await?;

    tracing::info!(
        action_id,
        category_id,
        excluded = binding.excluded,
        "Action bound to category",
    );

    Ok(Json(DataResponse { data: binding }))
}

/// DELETE /api/v1/actions/{id}/categories/{category_id}
pub async fn unbind_category(
    State(state): State<AppState>,
    Path((action_id, category_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = ActionRepo::unbind_category(&state.pool, action_id, category_id).await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ActionCategory",
            id: category_id,
        }));
    }

    tracing::info!(action_id, category_id, "Action unbound from category");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Attribute settings
// ---------------------------------------------------------------------------

/// GET /api/v1/actions/{id}/attributes
pub async fn list_settings(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_action_exists(&state, id).await?;

    let settings = ActionRepo::list_settings_for_action(&state.pool, id).await?;

    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/actions/{id}/attributes/{attribute_id}
///
/// Upsert the (action, attribute) override flags. `excluded` takes
/// precedence over `required` and `is_column` when the set is resolved.
pub async fn upsert_setting(
    State(state): State<AppState>,
    Path((action_id, attribute_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpsertAttributeSetting>,
) -> AppResult<impl IntoResponse> {
    ensure_action_exists(&state, action_id).await?;
    AttributeRepo::find_by_id(&state.pool, attribute_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Attribute",
            id: attribute_id,
        }))?;

    let setting =
        ActionRepo::upsert_setting(&state.pool, action_id, attribute_id, &input).await?;

    tracing::info!(
        action_id,
        attribute_id,
        required = setting.required,
        is_column = setting.is_column,
        excluded = setting.excluded,
        "Action attribute setting upserted",
    );

    Ok(Json(DataResponse { data: setting }))
}

/// DELETE /api/v1/actions/{id}/attributes/{attribute_id}
pub async fn delete_setting(
    State(state): State<AppState>,
    Path((action_id, attribute_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let removed = ActionRepo::delete_setting(&state.pool, action_id, attribute_id).await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "ActionAttributeSetting",
            id: attribute_id,
        }));
    }

    tracing::info!(action_id, attribute_id, "Action attribute setting deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Verify that an action exists, returning the full row.
async fn ensure_action_exists(
    state: &AppState,
    id: DbId,
) -> AppResult<adboard_db::models::action::Action> {
    ActionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id,
        }))
}
