//! Repository for the `recipe_versions` table.

use forklore_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::recipe::{CreateRecipe, Recipe};
use crate::models::recipe_version::{CreateRecipeVersion, ForkRecipeRequest, RecipeVersion};

/// Column list for recipe_versions queries.
const COLUMNS: &str = "id, original_recipe_id, parent_version_id, recipe_id, \
    version_seq, version_number, created_by_id, change_summary, is_public, \
    fork_count, success_rating, created_at";

/// Column list for recipes, used when the fork transaction inserts the
/// snapshot row itself.
const RECIPE_COLUMNS: &str = "id, owner_id, name, description, category, subcategory, \
    difficulty, servings, total_time_mins, status, current_version_id, \
    ingredients, instructions, created_at, updated_at";

/// Provides version-lineage operations for recipes.
pub struct RecipeVersionRepo;

impl RecipeVersionRepo {
    /// Insert a version row for an existing recipe snapshot, auto-assigning
    /// the next sequence number within the lineage.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateRecipeVersion,
    ) -> Result<RecipeVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_versions
                (original_recipe_id, parent_version_id, recipe_id, version_seq,
                 created_by_id, change_summary, is_public, success_rating)
             VALUES (
                $1, $2, $3,
                (SELECT COALESCE(MAX(version_seq), 0) + 1
                   FROM recipe_versions WHERE original_recipe_id = $1),
                $4, $5, $6, $7
             )
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(input.original_recipe_id)
            .bind(input.parent_version_id)
            .bind(input.recipe_id)
            .bind(user_id)
            .bind(&input.change_summary)
            .bind(input.is_public)
            .bind(input.success_rating)
            .fetch_one(pool)
            .await
    }

    /// Fork: insert the recipe snapshot, its version row, and the snapshot's
    /// back-link in one transaction.
    ///
    /// The snapshot is forced to `published` status and owned by the forking
    /// user. The parent's fork counter is NOT touched here -- that increment
    /// is a separate best-effort step the caller performs after commit.
    pub async fn create_with_snapshot(
        pool: &PgPool,
        user_id: DbId,
        original_recipe_id: DbId,
        request: &ForkRecipeRequest,
    ) -> Result<(Recipe, RecipeVersion), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let recipe_query = format!(
            "INSERT INTO recipes
                (owner_id, name, description, category, subcategory,
                 difficulty, servings, total_time_mins, status, ingredients, instructions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'published', $9, $10)
             RETURNING {RECIPE_COLUMNS}"
        );
        let snapshot: &CreateRecipe = &request.recipe;
        let recipe = sqlx::query_as::<_, Recipe>(&recipe_query)
            .bind(user_id)
            .bind(&snapshot.name)
            .bind(&snapshot.description)
            .bind(&snapshot.category)
            .bind(&snapshot.subcategory)
            .bind(snapshot.difficulty)
            .bind(snapshot.servings)
            .bind(snapshot.total_time_mins)
            .bind(Json(&snapshot.ingredients))
            .bind(Json(&snapshot.instructions))
            .fetch_one(&mut *tx)
            .await?;

        let version_query = format!(
            "INSERT INTO recipe_versions
                (original_recipe_id, parent_version_id, recipe_id, version_seq,
                 created_by_id, change_summary, is_public, success_rating)
             VALUES (
                $1, $2, $3,
                (SELECT COALESCE(MAX(version_seq), 0) + 1
                   FROM recipe_versions WHERE original_recipe_id = $1),
                $4, $5, $6, $7
             )
             RETURNING {COLUMNS}"
        );
        let version = sqlx::query_as::<_, RecipeVersion>(&version_query)
            .bind(original_recipe_id)
            .bind(request.parent_version_id)
            .bind(recipe.id)
            .bind(user_id)
            .bind(&request.change_summary)
            .bind(request.is_public.unwrap_or(true))
            .bind(request.success_rating)
            .fetch_one(&mut *tx)
            .await?;

        // Back-link the snapshot to the version that captured it.
        sqlx::query("UPDATE recipes SET current_version_id = $2 WHERE id = $1")
            .bind(recipe.id)
            .bind(version.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((recipe, version))
    }

    /// Find a version by its primary key.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecipeVersion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipe_versions WHERE id = $1");
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all versions of a lineage, newest first (flat history view).
    pub async fn list_by_lineage(
        pool: &PgPool,
        original_recipe_id: DbId,
    ) -> Result<Vec<RecipeVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_versions
             WHERE original_recipe_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(original_recipe_id)
            .fetch_all(pool)
            .await
    }

    /// List all versions of a lineage, oldest first (tree construction
    /// order: parents always precede their children).
    pub async fn list_by_lineage_chronological(
        pool: &PgPool,
        original_recipe_id: DbId,
    ) -> Result<Vec<RecipeVersion>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_versions
             WHERE original_recipe_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(original_recipe_id)
            .fetch_all(pool)
            .await
    }

    /// Increment a version's fork counter. Returns `false` if the version
    /// no longer exists. The counter is approximate: concurrent forks race
    /// on it and failures are not compensated.
    pub async fn increment_fork_count(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE recipe_versions SET fork_count = fork_count + 1 WHERE id = $1")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a success rating, scoped to the version's creator.
    ///
    /// Returns `None` when the id does not exist OR belongs to another
    /// user -- the filter is the authorization boundary.
    pub async fn set_success_rating(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        rating: i16,
    ) -> Result<Option<RecipeVersion>, sqlx::Error> {
        let query = format!(
            "UPDATE recipe_versions SET success_rating = $3
             WHERE id = $1 AND created_by_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeVersion>(&query)
            .bind(id)
            .bind(user_id)
            .bind(rating)
            .fetch_optional(pool)
            .await
    }
}
