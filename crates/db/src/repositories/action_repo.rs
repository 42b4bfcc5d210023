//! Repository for actions, their category bindings, and their
//! per-attribute override settings.

use adboard_core::types::DbId;
use sqlx::PgPool;

use crate::models::action::{
    Action, ActionAttributeSetting, ActionCategory, BindActionCategory, CreateAction,
    UpdateAction, UpsertAttributeSetting,
};

const ACTION_COLUMNS: &str = "id, name, slug, created_at, updated_at";

const BINDING_COLUMNS: &str =
    "id, action_id, category_id, sort, excluded, created_at, updated_at";

const SETTING_COLUMNS: &str =
    "id, action_id, attribute_id, required, is_column, excluded, created_at, updated_at";

/// Provides CRUD for actions plus the two pivot tables.
pub struct ActionRepo;

impl ActionRepo {
    // -- actions --

    pub async fn create(pool: &PgPool, input: &CreateAction) -> Result<Action, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions (name, slug)
             VALUES ($1, $2)
             RETURNING {ACTION_COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {ACTION_COLUMNS} FROM actions WHERE id = $1");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!("SELECT {ACTION_COLUMNS} FROM actions ORDER BY name, id");
        sqlx::query_as::<_, Action>(&query).fetch_all(pool).await
    }

    /// Update an action. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAction,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                updated_at = now()
             WHERE id = $1
             RETURNING {ACTION_COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .fetch_optional(pool)
            .await
    }

    /// Delete an action; bindings and settings cascade away with it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM actions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- category bindings --

    /// Bind an action to a category, or update an existing binding's
    /// sort/excluded flags (upsert on the unique pair).
    pub async fn bind_category(
        pool: &PgPool,
        action_id: DbId,
        category_id: DbId,
        input: &BindActionCategory,
    ) -> Result<ActionCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_categories (action_id, category_id, sort, excluded)
             VALUES ($1, $2, COALESCE($3, 0), $4)
             ON CONFLICT (action_id, category_id)
             DO UPDATE SET sort = EXCLUDED.sort, excluded = EXCLUDED.excluded, updated_at = now()
             RETURNING {BINDING_COLUMNS}"
        );
        sqlx::query_as::<_, ActionCategory>(&query)
            .bind(action_id)
            .bind(category_id)
            .bind(input.sort)
            .bind(input.excluded)
            .fetch_one(pool)
            .await
    }

    pub async fn unbind_category(
        pool: &PgPool,
        action_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM action_categories WHERE action_id = $1 AND category_id = $2",
        )
        .bind(action_id)
        .bind(category_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_bindings_for_action(
        pool: &PgPool,
        action_id: DbId,
    ) -> Result<Vec<ActionCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {BINDING_COLUMNS} FROM action_categories
             WHERE action_id = $1
             ORDER BY category_id"
        );
        sqlx::query_as::<_, ActionCategory>(&query)
            .bind(action_id)
            .fetch_all(pool)
            .await
    }

    // -- attribute settings --

    /// Upsert the (action, attribute) override flags.
    pub async fn upsert_setting(
        pool: &PgPool,
        action_id: DbId,
        attribute_id: DbId,
        input: &UpsertAttributeSetting,
    ) -> Result<ActionAttributeSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO action_attribute_settings
                (action_id, attribute_id, required, is_column, excluded)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (action_id, attribute_id)
             DO UPDATE SET required = EXCLUDED.required,
                           is_column = EXCLUDED.is_column,
                           excluded = EXCLUDED.excluded,
                           updated_at = now()
             RETURNING {SETTING_COLUMNS}"
        );
        sqlx::query_as::<_, ActionAttributeSetting>(&query)
            .bind(action_id)
            .bind(attribute_id)
            .bind(input.required)
            .bind(input.is_column)
            .bind(input.excluded)
            .fetch_one(pool)
            .await
    }

    pub async fn delete_setting(
        pool: &PgPool,
        action_id: DbId,
        attribute_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM action_attribute_settings
             WHERE action_id = $1 AND attribute_id = $2",
        )
        .bind(action_id)
        .bind(attribute_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_settings_for_action(
        pool: &PgPool,
        action_id: DbId,
    ) -> Result<Vec<ActionAttributeSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {SETTING_COLUMNS} FROM action_attribute_settings
             WHERE action_id = $1
             ORDER BY attribute_id"
        );
        sqlx::query_as::<_, ActionAttributeSetting>(&query)
            .bind(action_id)
            .fetch_all(pool)
            .await
    }
}
