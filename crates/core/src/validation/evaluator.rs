//! Rule evaluator — pure logic, no database access.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::types::DbId;

use super::rules::{FieldCheck, FieldRules, FieldViolation, Presence, ValidationResult};

/// Evaluate a submitted attribute payload against built rules.
///
/// The payload is the form's JSON object, keyed by `attr_{id}`. Keys that
/// match no rule are ignored; the surrounding form owns its other fields.
pub fn evaluate(
    rules: &BTreeMap<DbId, FieldRules>,
    payload: &serde_json::Map<String, Value>,
) -> ValidationResult {
    let mut errors = Vec::new();

    for field_rules in rules.values() {
        match payload.get(&field_rules.field) {
            Some(value) if is_provided(value) => {
                for check in &field_rules.checks {
                    if let Some(message) = check_value(check, value, &field_rules.name) {
                        errors.push(FieldViolation {
                            field: field_rules.field.clone(),
                            check: check.code().to_string(),
                            message,
                        });
                    }
                }
            }
            _ => {
                if field_rules.presence == Presence::Required {
                    errors.push(FieldViolation {
                        field: field_rules.field.clone(),
                        check: "required".to_string(),
                        message: format!("{} is required", field_rules.name),
                    });
                }
            }
        }
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Null, empty string, and empty array all count as "not provided",
/// exactly like an absent key.
fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

fn check_value(check: &FieldCheck, value: &Value, name: &str) -> Option<String> {
    match check {
        FieldCheck::Integer => {
            if value.is_i64() || value.is_u64() {
                None
            } else {
                Some(format!("{name} must be an integer"))
            }
        }
        FieldCheck::Numeric { min } => match value.as_f64() {
            Some(number) if number >= *min => None,
            Some(_) => Some(format!("{name} must be at least {min}")),
            None => Some(format!("{name} must be a number")),
        },
        FieldCheck::Boolean => {
            if value.is_boolean() {
                None
            } else {
                Some(format!("{name} must be a boolean"))
            }
        }
        FieldCheck::OneOf { options } => match value.as_str() {
            Some(s) if options.iter().any(|o| o == s) => None,
            _ => Some(format!(
                "{name} must be one of: {}",
                options.join(", ")
            )),
        },
        FieldCheck::SubsetOf { options, max_items } => {
            let Some(items) = value.as_array() else {
                return Some(format!("{name} must be a list"));
            };
            if items.len() > *max_items {
                return Some(format!("{name} accepts at most {max_items} choices"));
            }
            for item in items {
                match item.as_str() {
                    Some(s) if options.iter().any(|o| o == s) => {}
                    _ => {
                        return Some(format!(
                            "{name} contains a value outside the allowed options"
                        ))
                    }
                }
            }
            None
        }
        FieldCheck::Text { max_len } => match value.as_str() {
            Some(s) if s.chars().count() <= *max_len => None,
            Some(_) => Some(format!("{name} must be at most {max_len} characters")),
            None => Some(format!("{name} must be a string")),
        },
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
