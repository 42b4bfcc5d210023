//! Route definitions for the category tree and everything scoped to it:
//! owned attributes, inherited-attribute exclusions, and the resolution
//! query endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{attribute, category, exclusion, resolution};
use crate::state::AppState;

/// Category routes mounted at `/categories`.
///
/// ```text
/// GET    /                                 -> list_categories
/// POST   /                                 -> create_category
/// POST   /rebuild                          -> rebuild_tree
/// GET    /{id}                             -> get_category
/// PUT    /{id}                             -> update_category
/// DELETE /{id}                             -> delete_category
/// GET    /{id}/children                    -> list_children
/// GET    /{id}/ancestors                   -> list_ancestors
/// GET    /{id}/attributes                  -> list_attributes
/// POST   /{id}/attributes                  -> create_attribute
/// GET    /{id}/exclusions                  -> list_exclusions
/// POST   /{id}/exclusions                  -> add_exclusion
/// DELETE /{id}/exclusions/{attribute_id}   -> remove_exclusion
/// GET    /{id}/actions                     -> adjusted_actions
/// GET    /{id}/resolution                  -> resolve_attributes
/// POST   /{id}/validate                    -> validate_submission
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(category::list_categories).post(category::create_category),
        )
        .route("/rebuild", post(category::rebuild_tree))
        .route(
            "/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
        .route("/{id}/children", get(category::list_children))
        .route("/{id}/ancestors", get(category::list_ancestors))
        .route(
            "/{id}/attributes",
            get(attribute::list_attributes).post(attribute::create_attribute),
        )
        .route(
            "/{id}/exclusions",
            get(exclusion::list_exclusions).post(exclusion::add_exclusion),
        )
        .route(
            "/{id}/exclusions/{attribute_id}",
            delete(exclusion::remove_exclusion),
        )
        .route("/{id}/actions", get(resolution::adjusted_actions))
        .route("/{id}/resolution", get(resolution::resolve_attributes))
        .route("/{id}/validate", post(resolution::validate_submission))
}
