//! Repository for the `attributes` table.

use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::attribute::{Attribute, CreateAttribute, UpdateAttribute};

const COLUMNS: &str = "id, category_id, name, kind, options, sort, created_at, updated_at";

/// Provides CRUD operations for dynamic attributes.
///
/// Kind and option-list validity are domain rules checked by the caller
/// before insert/update; this layer only persists.
pub struct AttributeRepo;

impl AttributeRepo {
    /// Insert a new attribute owned by `category_id`.
    pub async fn create(
        pool: &PgPool,
        category_id: DbId,
        input: &CreateAttribute,
    ) -> Result<Attribute, sqlx::Error> {
        let query = format!(
            "INSERT INTO attributes (category_id, name, kind, options, sort)
             VALUES ($1, $2, $3, COALESCE($4, ARRAY[]::text[]), COALESCE($5, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(category_id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.options)
            .bind(input.sort)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attributes WHERE id = $1");
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Attributes owned directly by one category, in display order.
    pub async fn list_by_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attributes
             WHERE category_id = $1
             ORDER BY sort, id"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    /// Attributes owned by any of the given categories.
    pub async fn list_by_categories(
        pool: &PgPool,
        category_ids: &[DbId],
    ) -> Result<Vec<Attribute>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attributes
             WHERE category_id = ANY($1)
             ORDER BY sort, id"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(category_ids)
            .fetch_all(pool)
            .await
    }

    /// Update an attribute. Only non-`None` fields in `input` are applied;
    /// a provided `options` list replaces the stored one wholesale.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAttribute,
    ) -> Result<Option<Attribute>, sqlx::Error> {
        let query = format!(
            "UPDATE attributes SET
                name = COALESCE($2, name),
                kind = COALESCE($3, kind),
                options = COALESCE($4, options),
                sort = COALESCE($5, sort),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attribute>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.kind)
            .bind(&input.options)
            .bind(input.sort)
            .fetch_optional(pool)
            .await
    }

    /// Delete an attribute. Exclusions and action settings referencing it
    /// cascade away with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attributes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
