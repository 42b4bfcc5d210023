//! Error type for repository operations that mix SQL and domain checks.

use adboard_core::error::CoreError;

/// Most repository methods return plain `sqlx::Error`. Tree-mutating
/// methods also run domain checks (cycle prevention, delete policy,
/// bounds rebuild) and use this combined type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
