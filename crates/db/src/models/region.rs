//! Region tree models and DTOs. Same shape as categories, independent
//! hierarchy, no attribute catalog.

use adboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::SLUG_RE;

/// A row from the `regions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Region {
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

impl Region {
    pub fn is_leaf(&self) -> bool {
        self.rgt == self.lft + 1
    }
}

/// DTO for creating a region.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRegion {
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

/// DTO for updating a region.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRegion {
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
