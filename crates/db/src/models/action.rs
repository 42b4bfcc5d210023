//! Action models and DTOs: the actions themselves, their category
//! bindings, and per-attribute override settings.

use adboard_core::catalog::{ActionBinding, ActionDef, AttributeSetting, SettingEffect};
use adboard_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::SLUG_RE;

/// A row from the `actions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Action {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Action {
    pub fn to_def(&self) -> ActionDef {
        ActionDef {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// A row from the `action_categories` binding table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionCategory {
    pub id: DbId,
    pub action_id: DbId,
    pub category_id: DbId,
    pub sort: i32,
    pub excluded: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActionCategory {
    pub fn to_def(&self) -> ActionBinding {
        ActionBinding {
            action_id: self.action_id,
            category_id: self.category_id,
            sort: self.sort,
            excluded: self.excluded,
        }
    }
}

/// A row from the `action_attribute_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActionAttributeSetting {
    pub id: DbId,
    pub action_id: DbId,
    pub attribute_id: DbId,
    pub required: bool,
    pub is_column: bool,
    pub excluded: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ActionAttributeSetting {
    /// Collapse the stored flags; exclusion dominates.
    pub fn to_def(&self) -> AttributeSetting {
        AttributeSetting {
            action_id: self.action_id,
            attribute_id: self.attribute_id,
            effect: SettingEffect::from_flags(self.required, self.is_column, self.excluded),
        }
    }
}

/// DTO for creating an action.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAction {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(
        length(min = 1, max = 120),
        regex(path = *SLUG_RE, message = "must be a lowercase dash-separated slug")
    )]
    pub slug: String,
}

/// DTO for updating an action.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAction {
    #[validate(length(min = 1, max = 120))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 120),
        regex(path = *SLUG_RE, message = "must be a lowercase dash-separated slug")
    )]
    pub slug: Option<String>,
}

/// DTO for binding an action to a category (upsert semantics).
#[derive(Debug, Clone, Deserialize)]
pub struct BindActionCategory {
    pub sort: Option<i32>,
    #[serde(default)]
    pub excluded: bool,
}

/// DTO for upserting an (action, attribute) override setting.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertAttributeSetting {
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub is_column: bool,
    #[serde(default)]
    pub excluded: bool,
}
