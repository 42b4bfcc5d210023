//! Route definitions for the region tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::region;
use crate::state::AppState;

/// Region routes mounted at `/regions`.
///
/// ```text
/// GET    /                  -> list_regions
/// POST   /                  -> create_region
/// POST   /rebuild           -> rebuild_tree
/// GET    /{id}              -> get_region
/// PUT    /{id}              -> update_region
/// DELETE /{id}              -> delete_region
/// GET    /{id}/children     -> list_children
/// GET    /{id}/ancestors    -> list_ancestors
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(region::list_regions).post(region::create_region))
        .route("/rebuild", post(region::rebuild_tree))
        .route(
            "/{id}",
            get(region::get_region)
                .put(region::update_region)
                .delete(region::delete_region),
        )
        .route("/{id}/children", get(region::list_children))
        .route("/{id}/ancestors", get(region::list_ancestors))
}
