//! Route definitions for actions, their category bindings, and their
//! per-attribute override settings.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::action;
use crate::state::AppState;

/// Action routes mounted at `/actions`.
///
/// ```text
/// GET    /                                  -> list_actions
/// POST   /                                  -> create_action
/// GET    /{id}                              -> get_action
/// PUT    /{id}                              -> update_action
/// DELETE /{id}                              -> delete_action
/// GET    /{id}/categories                   -> list_bindings
/// PUT    /{id}/categories/{category_id}     -> bind_category (upsert)
/// DELETE /{id}/categories/{category_id}     -> unbind_category
/// GET    /{id}/attributes                   -> list_settings
/// PUT    /{id}/attributes/{attribute_id}    -> upsert_setting
/// DELETE /{id}/attributes/{attribute_id}    -> delete_setting
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(action::list_actions).post(action::create_action))
        .route(
            "/{id}",
            get(action::get_action)
                .put(action::update_action)
                .delete(action::delete_action),
        )
        .route("/{id}/categories", get(action::list_bindings))
        .route(
            "/{id}/categories/{category_id}",
            put(action::bind_category).delete(action::unbind_category),
        )
        .route("/{id}/attributes", get(action::list_settings))
        .route(
            "/{id}/attributes/{attribute_id}",
            put(action::upsert_setting).delete(action::delete_setting),
        )
}
