//! Route definitions for attributes addressed by their own id.
//! Creation and listing live under the owning category's routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::attribute;
use crate::state::AppState;

/// Attribute routes mounted at `/attributes`.
///
/// ```text
/// GET    /{id}   -> get_attribute
/// PUT    /{id}   -> update_attribute
/// DELETE /{id}   -> delete_attribute
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(attribute::get_attribute)
            .put(attribute::update_attribute)
            .delete(attribute::delete_attribute),
    )
}
