pub mod action;
pub mod attribute;
pub mod category;
pub mod health;
pub mod region;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /categories                                      list, create
/// /categories/rebuild                              recompute tree bounds (POST)
/// /categories/{id}                                 get, update, delete
/// /categories/{id}/children                        direct children
/// /categories/{id}/ancestors                       root → node path
/// /categories/{id}/attributes                      list, create owned attributes
/// /categories/{id}/exclusions                      list, add inherited-attribute exclusions
/// /categories/{id}/exclusions/{attribute_id}       remove exclusion
/// /categories/{id}/actions                         actions assignable in the leaf
/// /categories/{id}/resolution?action_id=           resolved attribute set + field rules
/// /categories/{id}/validate?action_id=             evaluate an advert attribute payload
///
/// /attributes/{id}                                 get, update, delete
///
/// /regions                                         list, create
/// /regions/rebuild                                 recompute tree bounds (POST)
/// /regions/{id}                                    get, update, delete
/// /regions/{id}/children                           direct children
/// /regions/{id}/ancestors                          root → node path
///
/// /actions                                         list, create
/// /actions/{id}                                    get, update, delete
/// /actions/{id}/categories                         list bindings
/// /actions/{id}/categories/{category_id}           bind (PUT, upsert), unbind
/// /actions/{id}/attributes                         list attribute settings
/// /actions/{id}/attributes/{attribute_id}          upsert (PUT), delete setting
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/categories", category::router())
        .nest("/attributes", attribute::router())
        .nest("/regions", region::router())
        .nest("/actions", action::router())
}
