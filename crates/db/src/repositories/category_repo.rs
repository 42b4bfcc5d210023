//! Repository for the `categories` table.

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::category::{Category, CreateCategory, UpdateCategory};

use super::tree;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parent_id, name, slug, sort, lft, rgt, depth, created_at, updated_at";

/// Prefixed variant for the self-join in ancestor queries.
const ANC_COLUMNS: &str = "anc.id, anc.parent_id, anc.name, anc.slug, anc.sort, \
    anc.lft, anc.rgt, anc.depth, anc.created_at, anc.updated_at";

/// Provides CRUD and tree queries for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category and rebuild bounds in the same transaction.
    ///
    /// If `sort` is `None`, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, DbError> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO categories (parent_id, name, slug, sort)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING id",
        )
        .bind(input.parent_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.sort)
        .fetch_one(&mut *tx)
        .await?;

        tree::rebuild(&mut tx, "categories").await?;

        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(category)
    }

    /// Find a category by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole tree in pre-order (by lft).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY lft");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Direct children of a node, in sibling order.
    pub async fn children(pool: &PgPool, id: DbId) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM categories
             WHERE parent_id = $1
             ORDER BY sort, name, id"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Root → node path, node included: a bounded range scan over the
    /// nested-set bounds. Empty when the id does not exist.
    pub async fn ancestors_and_self(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {ANC_COLUMNS} FROM categories anc
             JOIN categories leaf ON leaf.id = $1
             WHERE anc.lft <= leaf.lft AND anc.rgt >= leaf.rgt
             ORDER BY anc.lft"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    pub async fn has_children(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE parent_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn owns_attributes(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM attributes WHERE category_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied;
    /// a provided `parent_id` moves the node with its whole subtree.
    ///
    /// Returns `None` if no row with the given `id` exists. Moving a node
    /// under itself or one of its descendants is rejected.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, DbError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        if let Some(new_parent) = input.parent_id {
            // The candidate parent must not lie inside this node's own
            // subtree (self included).
            let inside: bool = sqlx::query_scalar(
                "SELECT EXISTS(
                     SELECT 1 FROM categories p
                     JOIN categories n ON n.id = $1
                     WHERE p.id = $2 AND p.lft >= n.lft AND p.rgt <= n.rgt
                 )",
            )
            .bind(id)
            .bind(new_parent)
            .fetch_one(&mut *tx)
            .await?;
            if inside {
                return Err(CoreError::Validation(format!(
                    "Cannot move category {id} under its own subtree"
                ))
                .into());
            }
        }

        let query = format!(
            "UPDATE categories SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                sort = COALESCE($4, sort),
                parent_id = COALESCE($5, parent_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.sort)
            .bind(input.parent_id)
            .fetch_one(&mut *tx)
            .await?;

        tree::rebuild(&mut tx, "categories").await?;

        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        let category = sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(category))
    }

    /// Delete a category.
    ///
    /// Blocked with a Conflict while the node has children or still owns
    /// attributes: cascading would silently destroy definitions that
    /// action settings and exclusions reference.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(false);
        }

        let has_children: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE parent_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if has_children {
            return Err(CoreError::Conflict(format!(
                "Category {id} has child categories"
            ))
            .into());
        }

        let owns_attributes: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM attributes WHERE category_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if owns_attributes {
            return Err(CoreError::Conflict(format!(
                "Category {id} still owns attributes"
            ))
            .into());
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tree::rebuild(&mut tx, "categories").await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Operational repair: recompute all bounds from parent pointers.
    pub async fn rebuild(pool: &PgPool) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;
        tree::rebuild(&mut tx, "categories").await?;
        tx.commit().await?;
        Ok(())
    }
}
