//! One-pass loader for everything the resolution engine needs.

use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::action::{Action, ActionAttributeSetting, ActionCategory};
use crate::models::attribute::Attribute;
use crate::models::category::Category;
use crate::models::exclusion::CategoryAttributeExclusion;

/// A consistent snapshot for resolving one leaf category.
///
/// `categories` is the whole tree (it feeds the in-memory tree store);
/// the other slices are pre-narrowed to the leaf's ancestry via
/// nested-set range joins.
#[derive(Debug)]
pub struct ResolutionData {
    pub categories: Vec<Category>,
    pub attributes: Vec<Attribute>,
    pub exclusions: Vec<CategoryAttributeExclusion>,
    pub actions: Vec<Action>,
    pub bindings: Vec<ActionCategory>,
    pub settings: Vec<ActionAttributeSetting>,
}

/// Loads resolution input. Read-only.
pub struct ResolutionRepo;

impl ResolutionRepo {
    /// Load the snapshot for one leaf category and, when given, one action.
    ///
    /// Settings are loaded only with an action; without one they play no
    /// part in resolution.
    pub async fn load(
        pool: &PgPool,
        category_id: DbId,
        action_id: Option<DbId>,
    ) -> Result<ResolutionData, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, parent_id, name, slug, sort, lft, rgt, depth, created_at, updated_at
             FROM categories ORDER BY lft",
        )
        .fetch_all(pool)
        .await?;

        let attributes = sqlx::query_as::<_, Attribute>(
            "SELECT a.id, a.category_id, a.name, a.kind, a.options, a.sort,
                    a.created_at, a.updated_at
             FROM attributes a
             JOIN categories anc ON anc.id = a.category_id
             JOIN categories leaf ON leaf.id = $1
             WHERE anc.lft <= leaf.lft AND anc.rgt >= leaf.rgt
             ORDER BY a.sort, a.id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await?;

        let exclusions = sqlx::query_as::<_, CategoryAttributeExclusion>(
            "SELECT id, category_id, attribute_id, created_at
             FROM category_attribute_exclusions
             WHERE category_id = $1
             ORDER BY attribute_id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await?;

        let actions = sqlx::query_as::<_, Action>(
            "SELECT id, name, slug, created_at, updated_at FROM actions ORDER BY name, id",
        )
        .fetch_all(pool)
        .await?;

        let bindings = sqlx::query_as::<_, ActionCategory>(
            "SELECT ac.id, ac.action_id, ac.category_id, ac.sort, ac.excluded,
                    ac.created_at, ac.updated_at
             FROM action_categories ac
             JOIN categories anc ON anc.id = ac.category_id
             JOIN categories leaf ON leaf.id = $1
             WHERE anc.lft <= leaf.lft AND anc.rgt >= leaf.rgt
             ORDER BY ac.id",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await?;

        let settings = match action_id {
            Some(action_id) => {
                sqlx::query_as::<_, ActionAttributeSetting>(
                    "SELECT id, action_id, attribute_id, required, is_column, excluded,
                            created_at, updated_at
                     FROM action_attribute_settings
                     WHERE action_id = $1
                     ORDER BY attribute_id",
                )
                .bind(action_id)
                .fetch_all(pool)
                .await?
            }
            None => Vec::new(),
        };

        Ok(ResolutionData {
            categories,
            attributes,
            exclusions,
            actions,
            bindings,
            settings,
        })
    }
}
