//! Arena-backed nested-set tree.
//!
//! Nodes live in a flat `Vec` in pre-order. [`Tree::build`] derives the
//! lft/rgt/depth bounds from parent pointers in a single walk, so the same
//! code serves both request-time queries and the operational rebuild that
//! repairs drifted bounds in the database.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::types::DbId;

/// Input row for [`Tree::build`]: a node as stored, before bounds are known.
#[derive(Debug, Clone)]
pub struct NewNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub sort: i32,
}

/// A node with computed nested-set position.
///
/// Invariant: a node's `[lft, rgt]` interval strictly contains the
/// intervals of all its descendants and is disjoint from its siblings'.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub name: String,
    pub slug: String,
    pub sort: i32,
    lft: i64,
    rgt: i64,
    depth: i32,
}

impl TreeNode {
    pub fn lft(&self) -> i64 {
        self.lft
    }

    pub fn rgt(&self) -> i64 {
        self.rgt
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// A leaf spans exactly one lft/rgt pair.
    pub fn is_leaf(&self) -> bool {
        self.rgt == self.lft + 1
    }
}

/// Materialized tree: nodes in pre-order plus an id → index map.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    index: HashMap<DbId, usize>,
}

impl Tree {
    /// Build the arena from stored rows.
    ///
    /// Siblings are ordered by (sort, name, id), which fixes the pre-order
    /// and therefore every query result. Fails on duplicate ids, unknown
    /// parents, and rows unreachable from any root (a parent cycle).
    pub fn build<I>(rows: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = NewNode>,
    {
        let rows: Vec<NewNode> = rows.into_iter().collect();

        let mut by_id: HashMap<DbId, usize> = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if by_id.insert(row.id, i).is_some() {
                return Err(CoreError::Internal(format!(
                    "duplicate tree node id {}",
                    row.id
                )));
            }
        }

        let mut children: HashMap<Option<DbId>, Vec<usize>> = HashMap::new();
        for (i, row) in rows.iter().enumerate() {
            if let Some(parent_id) = row.parent_id {
                if !by_id.contains_key(&parent_id) {
                    return Err(CoreError::Internal(format!(
                        "tree node {} references missing parent {}",
                        row.id, parent_id
                    )));
                }
            }
            children.entry(row.parent_id).or_default().push(i);
        }
        for siblings in children.values_mut() {
            siblings.sort_by(|&a, &b| {
                let (ra, rb) = (&rows[a], &rows[b]);
                (ra.sort, &ra.name, ra.id).cmp(&(rb.sort, &rb.name, rb.id))
            });
        }

        let mut nodes: Vec<TreeNode> = Vec::with_capacity(rows.len());
        let mut index: HashMap<DbId, usize> = HashMap::with_capacity(rows.len());

        // Depth-first walk with an explicit stack; counter yields the
        // nested-set bounds (enter = lft, leave = rgt).
        let mut counter: i64 = 0;
        let roots = children.remove(&None).unwrap_or_default();
        // (row index, arena index, next child cursor)
        let mut stack: Vec<(usize, usize, usize)> = Vec::new();

        for root in roots {
            push_node(&rows[root], 0, &mut counter, &mut nodes, &mut index);
            stack.push((root, nodes.len() - 1, 0));

            while let Some((row_i, arena_i, cursor)) = stack.pop() {
                let id = rows[row_i].id;
                let kids = children.get(&Some(id)).map(Vec::as_slice).unwrap_or(&[]);
                if cursor < kids.len() {
                    let child = kids[cursor];
                    stack.push((row_i, arena_i, cursor + 1));
                    let depth = nodes[arena_i].depth + 1;
                    push_node(&rows[child], depth, &mut counter, &mut nodes, &mut index);
                    stack.push((child, nodes.len() - 1, 0));
                } else {
                    counter += 1;
                    nodes[arena_i].rgt = counter;
                }
            }
        }

        if nodes.len() != rows.len() {
            return Err(CoreError::Internal(
                "tree contains nodes unreachable from any root (parent cycle)".to_string(),
            ));
        }

        Ok(Self { nodes, index })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn get(&self, id: DbId) -> Option<&TreeNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    fn get_or_err(&self, id: DbId, entity: &'static str) -> Result<&TreeNode, CoreError> {
        self.get(id).ok_or(CoreError::NotFound { entity, id })
    }

    /// Root → node path, node included. Ordered by lft, so the root comes
    /// first and the node itself last.
    pub fn ancestors_and_self(&self, id: DbId) -> Result<Vec<&TreeNode>, CoreError> {
        let node = self.get_or_err(id, "tree node")?;
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.lft <= node.lft && n.rgt >= node.rgt)
            .collect())
    }

    /// The node's subtree (itself included) as the contiguous pre-order
    /// slice between its bounds.
    pub fn subtree(&self, id: DbId) -> Result<&[TreeNode], CoreError> {
        let &i = self
            .index
            .get(&id)
            .ok_or(CoreError::NotFound { entity: "tree node", id })?;
        let span = ((self.nodes[i].rgt - self.nodes[i].lft + 1) / 2) as usize;
        Ok(&self.nodes[i..i + span])
    }

    /// Direct children in sibling order.
    pub fn children(&self, id: DbId) -> Result<Vec<&TreeNode>, CoreError> {
        Ok(self
            .subtree(id)?
            .iter()
            .filter(|n| n.parent_id == Some(id))
            .collect())
    }

    /// True iff the node has no children.
    pub fn is_leaf(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.get_or_err(id, "tree node")?.is_leaf())
    }

    /// Slash-joined slug path from root to node, e.g. `vehicles/cars`.
    pub fn path(&self, id: DbId) -> Result<String, CoreError> {
        let slugs: Vec<&str> = self
            .ancestors_and_self(id)?
            .iter()
            .map(|n| n.slug.as_str())
            .collect();
        Ok(slugs.join("/"))
    }

    /// Top-level nodes in sibling order.
    pub fn roots(&self) -> impl Iterator<Item = &TreeNode> {
        self.nodes.iter().filter(|n| n.parent_id.is_none())
    }
}

fn push_node(
    row: &NewNode,
    depth: i32,
    counter: &mut i64,
    nodes: &mut Vec<TreeNode>,
    index: &mut HashMap<DbId, usize>,
) {
    *counter += 1;
    index.insert(row.id, nodes.len());
    nodes.push(TreeNode {
        id: row.id,
        parent_id: row.parent_id,
        name: row.name.clone(),
        slug: row.slug.clone(),
        sort: row.sort,
        lft: *counter,
        rgt: 0,
        depth,
    });
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
