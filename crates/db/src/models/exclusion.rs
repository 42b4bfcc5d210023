//! Inherited-attribute exclusion models.

use adboard_core::catalog::InheritedAttributeExclusion;
use adboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `category_attribute_exclusions` table: this category
/// does not inherit the referenced ancestor-owned attribute.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryAttributeExclusion {
    pub id: DbId,
    pub category_id: DbId,
    pub attribute_id: DbId,
    pub created_at: Timestamp,
}

impl CategoryAttributeExclusion {
    pub fn to_def(&self) -> InheritedAttributeExclusion {
        InheritedAttributeExclusion {
            category_id: self.category_id,
            attribute_id: self.attribute_id,
        }
    }
}

/// DTO for adding an exclusion to a category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExclusion {
    pub attribute_id: DbId,
}
