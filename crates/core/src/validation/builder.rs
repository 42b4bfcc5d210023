//! Rule builder: resolved attributes → per-field validation rules.

use std::collections::BTreeMap;

use crate::catalog::{AttributeKind, MAX_MULTISELECT_ITEMS, MAX_TEXT_LEN};
use crate::resolution::AttributeResolution;
use crate::types::DbId;

use super::rules::{field_key, FieldCheck, FieldRules, Presence};

/// Build the validation rules for every visible attribute of a resolution.
///
/// Pure and idempotent: re-deriving from the same resolution yields an
/// identical map. Keys are attribute ids; iteration order is stable.
pub fn build_rules(resolution: &AttributeResolution) -> BTreeMap<DbId, FieldRules> {
    resolution
        .visible
        .iter()
        .map(|attribute| {
            let presence = if resolution.is_required(attribute.id) {
                Presence::Required
            } else {
                Presence::Nullable
            };

            let checks = match attribute.kind {
                AttributeKind::Integer => vec![FieldCheck::Integer],
                AttributeKind::Float => vec![FieldCheck::Numeric { min: 0.01 }],
                AttributeKind::Boolean => vec![FieldCheck::Boolean],
                AttributeKind::MultiSelect => vec![FieldCheck::SubsetOf {
                    options: attribute.options.clone(),
                    max_items: MAX_MULTISELECT_ITEMS,
                }],
                // A select without options degrades to bounded free text.
                AttributeKind::Select if !attribute.options.is_empty() => {
                    vec![FieldCheck::OneOf {
                        options: attribute.options.clone(),
                    }]
                }
                AttributeKind::Select | AttributeKind::Text => vec![FieldCheck::Text {
                    max_len: MAX_TEXT_LEN,
                }],
            };

            (
                attribute.id,
                FieldRules {
                    attribute_id: attribute.id,
                    field: field_key(attribute.id),
                    name: attribute.name.clone(),
                    presence,
                    checks,
                },
            )
        })
        .collect()
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
