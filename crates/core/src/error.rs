//! Domain error type shared by all adboard crates.

use crate::types::DbId;

/// Errors produced by domain logic in `adboard-core`.
///
/// The API layer maps these onto HTTP status codes; repositories convert
/// row lookups and constraint failures into the matching variants.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// An entity lookup by id found nothing.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input violated a domain rule (bad kind, non-leaf category, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation conflicts with existing state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// An invariant the caller cannot recover from was broken.
    #[error("Internal error: {0}")]
    Internal(String),
}
