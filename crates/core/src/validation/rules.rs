//! Field rule and result types.

use serde::Serialize;

use crate::types::DbId;

/// Form field key for an attribute value, e.g. `attr_12`.
///
/// Fields are keyed by attribute id, never by name: same-named attributes
/// on different ancestors are distinct.
pub fn field_key(attribute_id: DbId) -> String {
    format!("attr_{attribute_id}")
}

/// Whether a field must be present in the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Required,
    Nullable,
}

/// A single type-specific constraint on a field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum FieldCheck {
    /// Value must be a JSON integer.
    Integer,
    /// Value must be a number of at least `min`.
    Numeric { min: f64 },
    /// Value must be a JSON boolean.
    Boolean,
    /// Value must be one of the listed options.
    OneOf { options: Vec<String> },
    /// Value must be an array whose elements are a subset of the options,
    /// with a bounded element count.
    SubsetOf {
        options: Vec<String>,
        max_items: usize,
    },
    /// Value must be a string of bounded length.
    Text { max_len: usize },
}

impl FieldCheck {
    /// Short code used in violation reports.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Numeric { .. } => "numeric",
            Self::Boolean => "boolean",
            Self::OneOf { .. } => "one_of",
            Self::SubsetOf { .. } => "subset_of",
            Self::Text { .. } => "text",
        }
    }
}

/// The complete rule set for one attribute field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldRules {
    pub attribute_id: DbId,
    /// Form field key (`attr_{id}`).
    pub field: String,
    /// Attribute display name, for error messages.
    pub name: String,
    pub presence: Presence,
    pub checks: Vec<FieldCheck>,
}

/// A single field-level violation.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub check: String,
    pub message: String,
}

/// Aggregated result of evaluating a submission.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FieldViolation>,
}
