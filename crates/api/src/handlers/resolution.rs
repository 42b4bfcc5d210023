//! Handlers for attribute resolution queries.
//!
//! Each request loads a fresh snapshot of the tree and catalog, runs the
//! pure resolution engine over it, and answers from that result. There is
//! no cross-request cache; correctness only needs the one snapshot.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use adboard_core::catalog::{
    ActionBinding, ActionDef, AttributeDef, AttributeSetting, InheritedAttributeExclusion,
};
use adboard_core::error::CoreError;
use adboard_core::resolution::{AttributeResolution, Resolver};
use adboard_core::taxonomy::{NewNode, Tree};
use adboard_core::types::DbId;
use adboard_core::validation::builder::build_rules;
use adboard_core::validation::evaluator::evaluate;
use adboard_core::validation::rules::FieldRules;
use adboard_db::repositories::{ActionRepo, CategoryRepo, ResolutionData, ResolutionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for the resolution endpoints.
#[derive(Debug, Deserialize)]
pub struct ResolutionParams {
    /// Optional action scoping the required/column/excluded overrides.
    pub action_id: Option<DbId>,
}

/// Payload of `GET /categories/{id}/resolution`.
#[derive(Debug, Serialize)]
pub struct ResolutionPayload {
    pub resolution: AttributeResolution,
    /// Per-attribute validation rules, keyed by attribute id.
    pub rules: BTreeMap<DbId, FieldRules>,
}

/// GET /api/v1/categories/{id}/actions
///
/// Actions assignable when posting an advert in the leaf category:
/// bindings are inherited down the tree, and the binding closest to the
/// leaf decides exclusion and ordering.
pub async fn adjusted_actions(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_category_exists(&state, category_id).await?;

    let data = ResolutionRepo::load(&state.pool, category_id, None).await?;
    let actions = with_resolver(&data, |resolver| resolver.adjusted_actions(category_id))?;

    Ok(Json(DataResponse { data: actions }))
}

/// GET /api/v1/categories/{id}/resolution?action_id=
///
/// The resolved attribute set for a leaf category plus the validation
/// rules derived from it. 400 for non-leaf categories.
pub async fn resolve_attributes(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Query(params): Query<ResolutionParams>,
) -> AppResult<impl IntoResponse> {
    ensure_category_exists(&state, category_id).await?;
    ensure_action_exists(&state, params.action_id).await?;

    let data = ResolutionRepo::load(&state.pool, category_id, params.action_id).await?;
    let resolution =
        with_resolver(&data, |resolver| resolver.resolve(category_id, params.action_id))?;
    let rules = build_rules(&resolution);

    Ok(Json(DataResponse {
        data: ResolutionPayload { resolution, rules },
    }))
}

/// POST /api/v1/categories/{id}/validate?action_id=
///
/// Evaluate a submitted advert attribute payload (an object keyed by
/// `attr_{id}`) against the rules the resolution yields. Always returns
/// 200 with the evaluation result; rule violations are data, not errors.
pub async fn validate_submission(
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Query(params): Query<ResolutionParams>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let serde_json::Value::Object(payload) = payload else {
        return Err(AppError::BadRequest(
            "Submission payload must be a JSON object".into(),
        ));
    };

    ensure_category_exists(&state, category_id).await?;
    ensure_action_exists(&state, params.action_id).await?;

    let data = ResolutionRepo::load(&state.pool, category_id, params.action_id).await?;
    let resolution =
        with_resolver(&data, |resolver| resolver.resolve(category_id, params.action_id))?;
    let rules = build_rules(&resolution);
    let result = evaluate(&rules, &payload);

    Ok(Json(DataResponse { data: result }))
}

/// Map a loaded snapshot onto core types, build the resolver, and run `f`.
fn with_resolver<T>(
    data: &ResolutionData,
    f: impl FnOnce(&Resolver<'_>) -> Result<T, CoreError>,
) -> Result<T, AppError> {
    let tree = Tree::build(data.categories.iter().map(|c| NewNode {
        id: c.id,
        parent_id: c.parent_id,
        name: c.name.clone(),
        slug: c.slug.clone(),
        sort: c.sort,
    }))?;

    let attributes: Vec<AttributeDef> = data
        .attributes
        .iter()
        .map(|a| a.to_def())
        .collect::<Result<_, _>>()?;
    let exclusions: Vec<InheritedAttributeExclusion> =
        data.exclusions.iter().map(|e| e.to_def()).collect();
    let actions: Vec<ActionDef> = data.actions.iter().map(|a| a.to_def()).collect();
    let bindings: Vec<ActionBinding> = data.bindings.iter().map(|b| b.to_def()).collect();
    let settings: Vec<AttributeSetting> = data.settings.iter().map(|s| s.to_def()).collect();

    let resolver = Resolver::new(
        &tree,
        &attributes,
        &exclusions,
        &actions,
        &bindings,
        &settings,
    );
    Ok(f(&resolver)?)
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

/// Verify that the optional action parameter references a real action.
async fn ensure_action_exists(state: &AppState, id: Option<DbId>) -> AppResult<()> {
    let Some(id) = id else { return Ok(()) };
    ActionRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Action",
            id,
        }))
}