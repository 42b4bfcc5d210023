//! Hierarchy support for categories and regions.
//!
//! Both taxonomies share one tree representation: a flat arena of nodes in
//! pre-order with nested-set bounds, built from (id, parent, slug, sort)
//! rows. Ancestor and descendant queries are bounded range scans over the
//! arena, never recursive parent-chasing.

pub mod tree;

pub use tree::{NewNode, Tree, TreeNode};
