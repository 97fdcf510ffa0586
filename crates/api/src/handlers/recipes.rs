//! Handlers for recipe CRUD and nutrition estimation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use forklore_core::conversions::{self, Unit};
use forklore_core::error::CoreError;
use forklore_core::recipe::{self, Category};
use forklore_core::types::DbId;
use forklore_core::nutrition;
use forklore_db::models::recipe::{CreateRecipe, Recipe, UpdateRecipe};
use forklore_db::repositories::RecipeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Query parameters for the recipe listing.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// Query parameters for unit conversion.
#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Verify that a recipe exists, returning the full row.
pub(crate) async fn ensure_recipe_exists(
    pool: &sqlx::PgPool,
    id: DbId,
) -> AppResult<Recipe> {
    RecipeRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        })
    })
}

/// Validate the scalar fields shared by create and fork payloads.
pub(crate) fn validate_recipe_input(input: &CreateRecipe) -> Result<(), CoreError> {
    recipe::validate_recipe_name(&input.name)?;
    Category::from_str(&input.category)?;
    recipe::validate_difficulty(input.difficulty)?;
    recipe::validate_servings(input.servings)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// POST /recipes
// ---------------------------------------------------------------------------

/// Create a recipe owned by the caller, in draft status.
pub async fn create_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateRecipe>,
) -> AppResult<impl IntoResponse> {
    validate_recipe_input(&body)?;

    let created = RecipeRepo::create(&state.pool, auth.user_id, &body, "draft").await?;

    tracing::info!(
        recipe_id = created.id,
        user_id = auth.user_id,
        name = %body.name,
        "Recipe created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /recipes
// ---------------------------------------------------------------------------

/// List published recipes, newest first.
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(50).clamp(1, 200);
    let recipes = RecipeRepo::list_published(&state.pool, limit).await?;

    tracing::debug!(count = recipes.len(), "Listed published recipes");

    Ok(Json(DataResponse { data: recipes }))
}

// ---------------------------------------------------------------------------
// GET /recipes/:id
// ---------------------------------------------------------------------------

/// Get a single recipe by ID.
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: recipe }))
}

// ---------------------------------------------------------------------------
// PUT /recipes/:id
// ---------------------------------------------------------------------------

/// Update a recipe. The owner filter inside the repository is the
/// authorization check: a foreign-owned recipe reports not-found.
pub async fn update_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateRecipe>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = body.name {
        recipe::validate_recipe_name(name)?;
    }
    if let Some(ref category) = body.category {
        Category::from_str(category)?;
    }
    if let Some(difficulty) = body.difficulty {
        recipe::validate_difficulty(difficulty)?;
    }
    if let Some(servings) = body.servings {
        recipe::validate_servings(servings)?;
    }

    let updated = RecipeRepo::update(&state.pool, id, auth.user_id, &body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Recipe",
            id,
        }))?;

    tracing::info!(recipe_id = id, user_id = auth.user_id, "Recipe updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /units/convert
// ---------------------------------------------------------------------------

/// Convert an ingredient amount between units, e.g. when scaling servings.
pub async fn convert_units(
    Query(params): Query<ConvertParams>,
) -> AppResult<impl IntoResponse> {
    let from = Unit::from_str(&params.from)?;
    let to = Unit::from_str(&params.to)?;
    let converted = conversions::convert_amount(params.amount, from, to)?;
    let display = conversions::humanize_amount(converted, to);
    Ok(Json(DataResponse { data: display }))
}

// ---------------------------------------------------------------------------
// GET /recipes/:id/nutrition
// ---------------------------------------------------------------------------

/// Estimate nutrition totals for a recipe's current ingredient list.
pub async fn recipe_nutrition(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let recipe = ensure_recipe_exists(&state.pool, id).await?;
    let estimate = nutrition::estimate(&recipe.snapshot());
    Ok(Json(DataResponse { data: estimate }))
}
