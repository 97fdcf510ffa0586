//! Repository for the `recipes` table.

use forklore_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};

/// Column list for recipes queries.
const COLUMNS: &str = "id, owner_id, name, description, category, subcategory, \
    difficulty, servings, total_time_mins, status, current_version_id, \
    ingredients, instructions, created_at, updated_at";

/// Provides CRUD operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    /// Insert a new recipe owned by `owner_id` with the given status.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRecipe,
        status: &str,
    ) -> Result<Recipe, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipes
                (owner_id, name, description, category, subcategory,
                 difficulty, servings, total_time_mins, status, ingredients, instructions)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(input.difficulty)
            .bind(input.servings)
            .bind(input.total_time_mins)
            .bind(status)
            .bind(Json(&input.ingredients))
            .bind(Json(&input.instructions))
            .fetch_one(pool)
            .await
    }

    /// Find a recipe by its primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipes WHERE id = $1");
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List published recipes, newest first.
    pub async fn list_published(pool: &PgPool, limit: i64) -> Result<Vec<Recipe>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipes
             WHERE status = 'published'
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a recipe, scoped to its owner.
    ///
    /// The owner filter is the authorization boundary: a foreign-owned id
    /// matches zero rows and returns `None`, indistinguishable from a
    /// missing recipe.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateRecipe,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let query = format!(
            "UPDATE recipes SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                subcategory = COALESCE($6, subcategory),
                difficulty = COALESCE($7, difficulty),
                servings = COALESCE($8, servings),
                total_time_mins = COALESCE($9, total_time_mins),
                status = COALESCE($10, status),
                ingredients = COALESCE($11, ingredients),
                instructions = COALESCE($12, instructions),
                updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.category)
            .bind(&input.subcategory)
            .bind(input.difficulty)
            .bind(input.servings)
            .bind(input.total_time_mins)
            .bind(&input.status)
            .bind(input.ingredients.as_ref().map(Json))
            .bind(input.instructions.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }
}
