//! Repository for the `category_attribute_exclusions` table.

use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::exclusion::CategoryAttributeExclusion;

const COLUMNS: &str = "id, category_id, attribute_id, created_at";

/// Provides the (category, attribute) exclusion pairs that stop
/// inheritance of ancestor-owned attributes.
pub struct ExclusionRepo;

impl ExclusionRepo {
    /// Record an exclusion. The unique pair index turns duplicates into a
    /// constraint violation the API maps to 409.
    pub async fn add(
        pool: &PgPool,
        category_id: DbId,
        attribute_id: DbId,
    ) -> Result<CategoryAttributeExclusion, sqlx::Error> {
        let query = format!(
            "INSERT INTO category_attribute_exclusions (category_id, attribute_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryAttributeExclusion>(&query)
            .bind(category_id)
            .bind(attribute_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_category(
        pool: &PgPool,
        category_id: DbId,
    ) -> Result<Vec<CategoryAttributeExclusion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_attribute_exclusions
             WHERE category_id = $1
             ORDER BY attribute_id"
        );
        sqlx::query_as::<_, CategoryAttributeExclusion>(&query)
            .bind(category_id)
            .fetch_all(pool)
            .await
    }

    pub async fn remove(
        pool: &PgPool,
        category_id: DbId,
        attribute_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM category_attribute_exclusions
             WHERE category_id = $1 AND attribute_id = $2",
        )
        .bind(category_id)
        .bind(attribute_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
