//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Tree-mutating methods
//! rebuild nested-set bounds inside their own transaction and return
//! [`crate::error::DbError`]; plain queries return `sqlx::Error`.

pub mod action_repo;
pub mod attribute_repo;
pub mod category_repo;
pub mod exclusion_repo;
pub mod region_repo;
pub mod resolution_repo;
mod tree;

pub use action_repo::ActionRepo;
pub use attribute_repo::AttributeRepo;
pub use category_repo::CategoryRepo;
pub use exclusion_repo::ExclusionRepo;
pub use region_repo::RegionRepo;
pub use resolution_repo::{ResolutionData, ResolutionRepo};
