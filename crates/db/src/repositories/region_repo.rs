//! Repository for the `regions` table. Same tree mechanics as
//! categories, without an attribute catalog.

use adboard_core::error::CoreError;
use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::region::{CreateRegion, Region, UpdateRegion};

use super::tree;

const COLUMNS: &str = "id, parent_id, name, slug, sort, lft, rgt, depth, created_at, updated_at";

const ANC_COLUMNS: &str = "anc.id, anc.parent_id, anc.name, anc.slug, anc.sort, \
    anc.lft, anc.rgt, anc.depth, anc.created_at, anc.updated_at";

/// Provides CRUD and tree queries for regions.
pub struct RegionRepo;

impl RegionRepo {
    /// Insert a new region and rebuild bounds in the same transaction.
    pub async fn create(pool: &PgPool, input: &CreateRegion) -> Result<Region, DbError> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO regions (parent_id, name, slug, sort)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING id",
        )
        .bind(input.parent_id)
        .bind(&input.name)
        .bind(&input.slug)
        .bind(input.sort)
        .fetch_one(&mut *tx)
        .await?;

        tree::rebuild(&mut tx, "regions").await?;

        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        let region = sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(region)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the whole tree in pre-order (by lft).
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM regions ORDER BY lft");
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }

    /// Direct children of a node, in sibling order.
    pub async fn children(pool: &PgPool, id: DbId) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM regions
             WHERE parent_id = $1
             ORDER BY sort, name, id"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Root → node path, node included. Empty when the id does not exist.
    pub async fn ancestors_and_self(pool: &PgPool, id: DbId) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!(
            "SELECT {ANC_COLUMNS} FROM regions anc
             JOIN regions leaf ON leaf.id = $1
             WHERE anc.lft <= leaf.lft AND anc.rgt >= leaf.rgt
             ORDER BY anc.lft"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Update a region; a provided `parent_id` moves the subtree.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRegion,
    ) -> Result<Option<Region>, DbError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM regions WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(None);
        }

        if let Some(new_parent) = input.parent_id {
            let inside: bool = sqlx::query_scalar(
                "SELECT EXISTS(
                     SELECT 1 FROM regions p
                     JOIN regions n ON n.id = $1
                     WHERE p.id = $2 AND p.lft >= n.lft AND p.rgt <= n.rgt
                 )",
            )
            .bind(id)
            .bind(new_parent)
            .fetch_one(&mut *tx)
            .await?;
            if inside {
                return Err(CoreError::Validation(format!(
                    "Cannot move region {id} under its own subtree"
                ))
                .into());
            }
        }

        let query = format!(
            "UPDATE regions SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                sort = COALESCE($4, sort),
                parent_id = COALESCE($5, parent_id),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.sort)
            .bind(input.parent_id)
            .fetch_one(&mut *tx)
            .await?;

        tree::rebuild(&mut tx, "regions").await?;

        let query = format!("SELECT {COLUMNS} FROM regions WHERE id = $1");
        let region = sqlx::query_as::<_, Region>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(region))
    }

    /// Delete a region. Blocked with a Conflict while it has children.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let mut tx = pool.begin().await?;

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM regions WHERE id = $1)")
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;
        if !exists {
            return Ok(false);
        }

        let has_children: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM regions WHERE parent_id = $1)")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if has_children {
            return Err(CoreError::Conflict(format!("Region {id} has child regions")).into());
        }

        sqlx::query("DELETE FROM regions WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tree::rebuild(&mut tx, "regions").await?;
        tx.commit().await?;
        Ok(true)
    }

    /// Operational repair: recompute all bounds from parent pointers.
    pub async fn rebuild(pool: &PgPool) -> Result<(), DbError> {
        let mut tx = pool.begin().await?;
        tree::rebuild(&mut tx, "regions").await?;
        tx.commit().await?;
        Ok(())
    }
}
