//! Adboard domain core.
//!
//! Pure business logic for the classifieds taxonomy: the category/region
//! tree store, the dynamic attribute catalog, action-scoped attribute
//! resolution, and the validation-rule builder/evaluator used when an
//! advert form is submitted. No database access — the `adboard-db` crate
//! loads rows and feeds them in as plain data.

pub mod catalog;
pub mod error;
pub mod resolution;
pub mod taxonomy;
pub mod types;
pub mod validation;
