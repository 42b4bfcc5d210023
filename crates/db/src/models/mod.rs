//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod action;
pub mod attribute;
pub mod category;
pub mod exclusion;
pub mod region;

use std::sync::LazyLock;

use regex::Regex;

/// Slug charset shared by categories, regions, and actions:
/// lowercase alphanumerics separated by single dashes.
pub static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));
