//! Attribute resolution engine.
//!
//! Answers, for a leaf category and an optional action: which attributes
//! apply, which are required, which render as list columns, and which
//! actions can be chosen at all. Pure combination logic over the tree and
//! catalog slices — no database access, no caching, no hidden state; the
//! same inputs always produce the same result.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::Serialize;

use crate::catalog::{
    ActionBinding, ActionDef, AttributeDef, AttributeSetting, InheritedAttributeExclusion,
    SettingEffect,
};
use crate::error::CoreError;
use crate::taxonomy::Tree;
use crate::types::DbId;

/// Resolution output for one (leaf category, optional action) pair.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeResolution {
    pub category_id: DbId,
    pub action_id: Option<DbId>,
    /// Ids of every inherited-and-not-excluded attribute, in render order.
    pub available: Vec<DbId>,
    /// Full definitions of the attributes left after action-level
    /// exclusion, ordered root-most owner first, then by (sort, id).
    pub visible: Vec<AttributeDef>,
    /// Attributes the chosen action marks required. Always empty without
    /// an action: nothing is required outside an action context.
    pub required: BTreeSet<DbId>,
    /// Attributes the chosen action renders as list columns.
    pub columns: BTreeSet<DbId>,
    /// Attributes the chosen action suppresses entirely.
    pub excluded_by_action: BTreeSet<DbId>,
}

impl AttributeResolution {
    pub fn is_required(&self, attribute_id: DbId) -> bool {
        self.required.contains(&attribute_id)
    }
}

/// An action assignable in a leaf category, with the sort value of its
/// winning binding.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedAction {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub sort: i32,
}

/// Borrows one consistent snapshot of the taxonomy and answers resolution
/// queries against it. Request-scoped: build, query, drop.
pub struct Resolver<'a> {
    tree: &'a Tree,
    attributes: &'a [AttributeDef],
    exclusions: &'a [InheritedAttributeExclusion],
    actions: &'a [ActionDef],
    bindings: &'a [ActionBinding],
    settings: &'a [AttributeSetting],
}

impl<'a> Resolver<'a> {
    pub fn new(
        tree: &'a Tree,
        attributes: &'a [AttributeDef],
        exclusions: &'a [InheritedAttributeExclusion],
        actions: &'a [ActionDef],
        bindings: &'a [ActionBinding],
        settings: &'a [AttributeSetting],
    ) -> Self {
        Self {
            tree,
            attributes,
            exclusions,
            actions,
            bindings,
            settings,
        }
    }

    /// Resolve the attribute set for a leaf category.
    ///
    /// Resolving a non-leaf is a caller error and fails fast: only leaves
    /// carry adverts, so attribute sets are undefined for interior nodes.
    pub fn resolve(
        &self,
        category_id: DbId,
        action_id: Option<DbId>,
    ) -> Result<AttributeResolution, CoreError> {
        let ancestry = self.leaf_ancestry(category_id)?;
        let position: HashMap<DbId, usize> = ancestry
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        // Inherited attributes the leaf explicitly opted out of.
        let excluded_inherited: HashSet<DbId> = self
            .exclusions
            .iter()
            .filter(|e| e.category_id == category_id)
            .map(|e| e.attribute_id)
            .collect();

        // Available = owned by any ancestry node, minus leaf exclusions.
        // De-duplicated by id only: same-named attributes on different
        // ancestors stay distinct.
        let mut seen: HashSet<DbId> = HashSet::new();
        let mut available: Vec<&AttributeDef> = self
            .attributes
            .iter()
            .filter(|a| position.contains_key(&a.category_id))
            .filter(|a| !excluded_inherited.contains(&a.id))
            .filter(|a| seen.insert(a.id))
            .collect();
        available.sort_by_key(|a| (position[&a.category_id], a.sort, a.id));

        let available_ids: HashSet<DbId> = available.iter().map(|a| a.id).collect();

        let mut required = BTreeSet::new();
        let mut columns = BTreeSet::new();
        let mut excluded_by_action = BTreeSet::new();

        if let Some(action_id) = action_id {
            // Settings pointing at attributes outside the ancestry are
            // stale state, not an error: skip them.
            for setting in self
                .settings
                .iter()
                .filter(|s| s.action_id == action_id)
                .filter(|s| available_ids.contains(&s.attribute_id))
            {
                match setting.effect {
                    SettingEffect::Excluded => {
                        excluded_by_action.insert(setting.attribute_id);
                    }
                    SettingEffect::Applies {
                        required: is_required,
                        column,
                    } => {
                        if is_required {
                            required.insert(setting.attribute_id);
                        }
                        if column {
                            columns.insert(setting.attribute_id);
                        }
                    }
                }
            }
            // Exclusion wins even if another row claims otherwise.
            required.retain(|id| !excluded_by_action.contains(id));
            columns.retain(|id| !excluded_by_action.contains(id));
        }

        let visible: Vec<AttributeDef> = available
            .iter()
            .filter(|a| !excluded_by_action.contains(&a.id))
            .map(|a| (*a).clone())
            .collect();

        Ok(AttributeResolution {
            category_id,
            action_id,
            available: available.iter().map(|a| a.id).collect(),
            visible,
            required,
            columns,
            excluded_by_action,
        })
    }

    /// The actions assignable when posting an advert in a leaf category.
    ///
    /// An action bound at several ancestry depths is decided by the
    /// binding closest to the leaf: its `excluded` flag and `sort` win.
    /// Ordered by (sort, name).
    pub fn adjusted_actions(&self, category_id: DbId) -> Result<Vec<ResolvedAction>, CoreError> {
        let ancestry = self.leaf_ancestry(category_id)?;
        let position: HashMap<DbId, usize> = ancestry
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();

        // Winning binding per action: the one deepest in the ancestry.
        let mut winners: HashMap<DbId, (usize, &ActionBinding)> = HashMap::new();
        for binding in self.bindings {
            let Some(&depth) = position.get(&binding.category_id) else {
                continue;
            };
            match winners.get(&binding.action_id) {
                Some(&(best, _)) if best >= depth => {}
                _ => {
                    winners.insert(binding.action_id, (depth, binding));
                }
            }
        }

        let mut resolved: Vec<ResolvedAction> = self
            .actions
            .iter()
            .filter_map(|action| {
                let &(_, binding) = winners.get(&action.id)?;
                if binding.excluded {
                    return None;
                }
                Some(ResolvedAction {
                    id: action.id,
                    name: action.name.clone(),
                    slug: action.slug.clone(),
                    sort: binding.sort,
                })
            })
            .collect();
        resolved.sort_by(|a, b| (a.sort, &a.name).cmp(&(b.sort, &b.name)));
        Ok(resolved)
    }

    /// Ancestry ids (root first) of a category that must be a leaf.
    fn leaf_ancestry(&self, category_id: DbId) -> Result<Vec<DbId>, CoreError> {
        let node = self
            .tree
            .get(category_id)
            .ok_or(CoreError::NotFound {
                entity: "Category",
                id: category_id,
            })?;
        if !node.is_leaf() {
            return Err(CoreError::Validation(format!(
                "Category {category_id} is not a leaf; attributes resolve only for leaf categories"
            )));
        }
        Ok(self
            .tree
            .ancestors_and_self(category_id)?
            .iter()
            .map(|n| n.id)
            .collect())
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
