//! Attribute and action catalog types.
//!
//! Plain-data descriptions of what the taxonomy owns: per-category dynamic
//! attributes, named actions, their category bindings, and per
//! (action, attribute) override settings. The resolution engine consumes
//! these as slices; the db crate maps its rows onto them.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Maximum number of choices accepted for a multi-select submission.
pub const MAX_MULTISELECT_ITEMS: usize = 20;

/// Maximum length of a free-text attribute value.
pub const MAX_TEXT_LEN: usize = 255;

/// The value shape of a dynamic attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Integer,
    Float,
    Boolean,
    /// Single choice from the option list; free text when no options exist.
    Select,
    /// Multiple choices from the option list, stored as a JSON array.
    MultiSelect,
    Text,
}

impl AttributeKind {
    /// The string code stored in the `attributes.kind` column.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Select => "select",
            Self::MultiSelect => "multiselect",
            Self::Text => "text",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "boolean" => Ok(Self::Boolean),
            "select" => Ok(Self::Select),
            "multiselect" => Ok(Self::MultiSelect),
            "text" => Ok(Self::Text),
            other => Err(CoreError::Validation(format!(
                "Unknown attribute kind: '{other}'"
            ))),
        }
    }

    /// Whether values must come from an enumerated option list.
    ///
    /// Select is not listed: it degrades to free text when no options are
    /// defined, so its option list may be empty.
    pub const fn requires_options(self) -> bool {
        matches!(self, Self::MultiSelect)
    }

    /// Whether an option list is meaningful for this kind at all.
    pub const fn accepts_options(self) -> bool {
        matches!(self, Self::Select | Self::MultiSelect)
    }
}

/// Validate an attribute's option list against its kind.
///
/// Enumerated kinds need a non-empty, duplicate-free list; scalar kinds
/// must not carry one. Reported at attribute create/update time — never
/// during resolution.
pub fn validate_options(kind: AttributeKind, options: &[String]) -> Result<(), CoreError> {
    if kind.requires_options() && options.is_empty() {
        return Err(CoreError::Validation(format!(
            "Attribute kind '{}' requires a non-empty option list",
            kind.code()
        )));
    }
    if !kind.accepts_options() && !options.is_empty() {
        return Err(CoreError::Validation(format!(
            "Attribute kind '{}' does not take options",
            kind.code()
        )));
    }
    if options.iter().any(|o| o.trim().is_empty()) {
        return Err(CoreError::Validation(
            "Attribute options must not be blank".to_string(),
        ));
    }
    let mut seen = std::collections::HashSet::new();
    for option in options {
        if !seen.insert(option.as_str()) {
            return Err(CoreError::Validation(format!(
                "Duplicate attribute option: '{option}'"
            )));
        }
    }
    Ok(())
}

/// A dynamic attribute owned by exactly one category.
///
/// Attributes are identified by id. Two ancestors may own attributes with
/// the same name; they stay distinct and are never merged.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeDef {
    pub id: DbId,
    /// The owning category.
    pub category_id: DbId,
    pub name: String,
    pub kind: AttributeKind,
    pub options: Vec<String>,
    pub sort: i32,
}

/// A (category, attribute) pair marking an ancestor-owned attribute as not
/// inherited by this category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritedAttributeExclusion {
    pub category_id: DbId,
    pub attribute_id: DbId,
}

/// A named operation ("Sell", "Rent", ...) attachable to categories.
#[derive(Debug, Clone, Serialize)]
pub struct ActionDef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// Association of an action with one category in the tree.
///
/// When an action is bound at several ancestry depths, the binding closest
/// to the leaf decides both `sort` and `excluded`.
#[derive(Debug, Clone, Copy)]
pub struct ActionBinding {
    pub action_id: DbId,
    pub category_id: DbId,
    pub sort: i32,
    pub excluded: bool,
}

/// The effect of one (action, attribute) setting.
///
/// Exclusion is a variant of its own rather than a third flag, so an
/// excluded attribute cannot simultaneously read as required or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingEffect {
    /// The attribute is suppressed entirely for this action.
    Excluded,
    Applies { required: bool, column: bool },
}

impl SettingEffect {
    /// Collapse the three stored booleans; `excluded` wins over the rest
    /// regardless of what the row says.
    pub fn from_flags(required: bool, column: bool, excluded: bool) -> Self {
        if excluded {
            Self::Excluded
        } else {
            Self::Applies { required, column }
        }
    }
}

/// A per (action, attribute) override row.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSetting {
    pub action_id: DbId,
    pub attribute_id: DbId,
    pub effect: SettingEffect,
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    // -- AttributeKind --

    #[test]
    fn kind_codes_round_trip() {
        for kind in [
            AttributeKind::Integer,
            AttributeKind::Float,
            AttributeKind::Boolean,
            AttributeKind::Select,
            AttributeKind::MultiSelect,
            AttributeKind::Text,
        ] {
            assert_eq!(AttributeKind::from_code(kind.code()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_code_rejected() {
        assert_matches!(
            AttributeKind::from_code("json"),
            Err(CoreError::Validation(_))
        );
    }

    // -- validate_options --

    #[test]
    fn multiselect_requires_options() {
        assert_matches!(
            validate_options(AttributeKind::MultiSelect, &[]),
            Err(CoreError::Validation(_))
        );
        assert!(validate_options(AttributeKind::MultiSelect, &opts(&["a", "b"])).is_ok());
    }

    #[test]
    fn select_accepts_empty_options() {
        // A select without options degrades to free text.
        assert!(validate_options(AttributeKind::Select, &[]).is_ok());
        assert!(validate_options(AttributeKind::Select, &opts(&["red", "blue"])).is_ok());
    }

    #[test]
    fn scalar_kinds_reject_options() {
        for kind in [
            AttributeKind::Integer,
            AttributeKind::Float,
            AttributeKind::Boolean,
            AttributeKind::Text,
        ] {
            assert_matches!(
                validate_options(kind, &opts(&["x"])),
                Err(CoreError::Validation(_))
            );
            assert!(validate_options(kind, &[]).is_ok());
        }
    }

    #[test]
    fn blank_option_rejected() {
        assert_matches!(
            validate_options(AttributeKind::Select, &opts(&["red", "  "])),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn duplicate_option_rejected() {
        assert_matches!(
            validate_options(AttributeKind::Select, &opts(&["red", "red"])),
            Err(CoreError::Validation(_))
        );
    }

    // -- SettingEffect --

    #[test]
    fn excluded_flag_dominates_stored_required_and_column() {
        assert_eq!(
            SettingEffect::from_flags(true, true, true),
            SettingEffect::Excluded
        );
    }

    #[test]
    fn non_excluded_flags_pass_through() {
        assert_eq!(
            SettingEffect::from_flags(true, false, false),
            SettingEffect::Applies {
                required: true,
                column: false
            }
        );
    }
}
