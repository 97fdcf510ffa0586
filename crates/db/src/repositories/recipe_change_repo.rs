//! Repository for the `recipe_changes` table.

use forklore_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe_change::{CreateRecipeChange, RecipeChange};

/// Column list for recipe_changes queries.
const COLUMNS: &str = "id, version_id, change_type, target, field, \
    previous_value, new_value, reason, created_at";

/// Provides insert-only access to the itemized change log.
pub struct RecipeChangeRepo;

impl RecipeChangeRepo {
    /// Bulk-insert change rows tagged with a version, in one transaction.
    pub async fn create_many(
        pool: &PgPool,
        version_id: DbId,
        changes: &[CreateRecipeChange],
    ) -> Result<Vec<RecipeChange>, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_changes
                (version_id, change_type, target, field, previous_value, new_value, reason)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );

        let mut tx = pool.begin().await?;
        let mut inserted = Vec::with_capacity(changes.len());
        for change in changes {
            let row = sqlx::query_as::<_, RecipeChange>(&query)
                .bind(version_id)
                .bind(&change.change_type)
                .bind(&change.target)
                .bind(&change.field)
                .bind(&change.previous_value)
                .bind(&change.new_value)
                .bind(&change.reason)
                .fetch_one(&mut *tx)
                .await?;
            inserted.push(row);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    /// List the change log for a version, in insertion order.
    pub async fn list_by_version(
        pool: &PgPool,
        version_id: DbId,
    ) -> Result<Vec<RecipeChange>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_changes
             WHERE version_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, RecipeChange>(&query)
            .bind(version_id)
            .fetch_all(pool)
            .await
    }
}
