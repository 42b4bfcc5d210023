//! Category tree models and DTOs.

use adboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::SLUG_RE;

/// A row from the `categories` table.
///
/// `lft`/`rgt`/`depth` are derived nested-set bounds; `parent_id` is the
/// source of truth for structure.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub sort: i32,
    pub lft: i64,
    pub rgt: i64,
    pub depth: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// A leaf spans exactly one lft/rgt pair.
    pub fn is_leaf(&self) -> bool {
        self.rgt == self.lft + 1
    }
}

/// DTO for creating a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(
        length(min = 1, max = 120),
        regex(path = *SLUG_RE, message = "must be a lowercase dash-separated slug")
    )]
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub sort: Option<i32>,
}

/// DTO for updating a category. Only provided fields are applied;
/// `parent_id` moves the node (and its subtree) under a new parent.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 120),
        regex(path = *SLUG_RE, message = "must be a lowercase dash-separated slug")
    )]
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort: Option<i32>,
}
