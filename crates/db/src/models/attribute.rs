//! Dynamic attribute models and DTOs.

use adboard_core::catalog::{AttributeDef, AttributeKind};
use adboard_core::error::CoreError;
use adboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `attributes` table.
///
/// `kind` holds the string code of an [`AttributeKind`]; `options` is
/// non-empty only for enumerated kinds.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attribute {
    pub id: DbId,
    pub category_id: DbId,
    pub name: String,
    pub kind: String,
    pub options: Vec<String>,
    pub sort: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Attribute {
    /// Parse the stored kind code.
    pub fn kind(&self) -> Result<AttributeKind, CoreError> {
        AttributeKind::from_code(&self.kind)
    }

    /// Convert to the plain-data definition the resolution engine takes.
    pub fn to_def(&self) -> Result<AttributeDef, CoreError> {
        Ok(AttributeDef {
            id: self.id,
            category_id: self.category_id,
            name: self.name.clone(),
            kind: self.kind()?,
            options: self.options.clone(),
            sort: self.sort,
        })
    }
}

/// DTO for creating an attribute under a category.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAttribute {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Kind code: integer, float, boolean, select, multiselect, text.
    pub kind: String,
    pub options: Option<Vec<String>>,
    pub sort: Option<i32>,
}

/// DTO for updating an attribute. A provided `options` list replaces the
/// stored one wholesale.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAttribute {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    pub kind: Option<String>,
    pub options: Option<Vec<String>>,
    pub sort: Option<i32>,
}
