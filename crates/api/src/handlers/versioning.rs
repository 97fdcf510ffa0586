//! Handlers for the version lineage: forking, history, tree, comparison,
//! ratings, and the itemized change log.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forklore_core::diff::DiffStatus;
use forklore_core::error::CoreError;
use forklore_core::recipe;
use forklore_core::types::DbId;
use forklore_core::versioning::{self, VersionComparison};
use forklore_db::models::recipe::Recipe;
use forklore_db::models::recipe_version::{
    ForkRecipeRequest, RateVersionRequest, RecipeVersion, VersionWithJoins,
};
use forklore_db::repositories::{RecipeChangeRepo, RecipeRepo, RecipeVersionRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::recipes::{ensure_recipe_exists, validate_recipe_input};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_version_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<RecipeVersion> {
    RecipeVersionRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RecipeVersion",
            id,
        }))
}

/// Both sides of a comparison must carry their recipe snapshot; a version
/// whose snapshot row is gone cannot be diffed.
fn require_snapshots(
    base: Option<Recipe>,
    other: Option<Recipe>,
) -> Result<(Recipe, Recipe), CoreError> {
    match (base, other) {
        (Some(base), Some(other)) => Ok((base, other)),
        _ => Err(CoreError::Validation(
            "Recipe data missing for comparison".to_string(),
        )),
    }
}

/// Join a version with its recipe snapshot and creator summary. Either
/// side may be missing (e.g. a deleted account); the joins are optional
/// rather than fatal.
async fn with_joins(pool: &sqlx::PgPool, version: RecipeVersion) -> AppResult<VersionWithJoins> {
    let recipe = RecipeRepo::find_by_id(pool, version.recipe_id).await?;
    let creator = UserRepo::summary_by_id(pool, version.created_by_id).await?;
    Ok(VersionWithJoins {
        version,
        recipe,
        creator,
    })
}

// ---------------------------------------------------------------------------
// POST /recipes/:id/fork
// ---------------------------------------------------------------------------

/// Fork a recipe: snapshot the submitted content as a new recipe row and
/// record a version pointing at it, atomically. The change log and the
/// parent's fork counter are written after commit; the counter increment
/// is best-effort and never fails the request.
pub async fn fork_recipe(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(original_recipe_id): Path<DbId>,
    Json(body): Json<ForkRecipeRequest>,
) -> AppResult<impl IntoResponse> {
    validate_recipe_input(&body.recipe)?;
    recipe::validate_change_summary(&body.change_summary)?;
    if let Some(rating) = body.success_rating {
        recipe::validate_success_rating(rating)?;
    }
    for change in &body.changes_made {
        // The change log records edits; an unchanged item has no row.
        if DiffStatus::from_str(&change.change_type)? == DiffStatus::Unchanged {
            return Err(AppError::Core(CoreError::Validation(
                "Change type 'unchanged' cannot be recorded in a change log".to_string(),
            )));
        }
        if !matches!(change.target.as_str(), "ingredient" | "instruction" | "general") {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Invalid change target '{}'. Must be one of: ingredient, instruction, general",
                change.target
            ))));
        }
    }

    ensure_recipe_exists(&state.pool, original_recipe_id).await?;

    // A declared parent must exist and belong to this lineage.
    if let Some(parent_id) = body.parent_version_id {
        let parent = ensure_version_exists(&state.pool, parent_id).await?;
        if parent.original_recipe_id != original_recipe_id {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Version {parent_id} does not belong to recipe {original_recipe_id}'s lineage"
            ))));
        }
    }

    let (recipe_row, version) =
        RecipeVersionRepo::create_with_snapshot(&state.pool, auth.user_id, original_recipe_id, &body)
            .await?;

    if !body.changes_made.is_empty() {
        RecipeChangeRepo::create_many(&state.pool, version.id, &body.changes_made).await?;
    }

    if let Some(parent_id) = body.parent_version_id {
        // The version itself is committed; losing an increment only skews
        // the approximate counter.
        match RecipeVersionRepo::increment_fork_count(&state.pool, parent_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(parent_id, "Fork count target vanished before increment")
            }
            Err(err) => {
                tracing::warn!(parent_id, error = %err, "Failed to increment fork count")
            }
        }
    }

    tracing::info!(
        version_id = version.id,
        recipe_id = recipe_row.id,
        original_recipe_id,
        parent_version_id = ?body.parent_version_id,
        user_id = auth.user_id,
        "Recipe forked"
    );

    let creator = UserRepo::summary_by_id(&state.pool, auth.user_id).await?;
    let joined = VersionWithJoins {
        version,
        recipe: Some(recipe_row),
        creator,
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: joined })))
}

// ---------------------------------------------------------------------------
// GET /versions/:id
// ---------------------------------------------------------------------------

/// Get one version with its recipe snapshot and creator.
pub async fn get_version(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let version = ensure_version_exists(&state.pool, id).await?;
    let joined = with_joins(&state.pool, version).await?;
    Ok(Json(DataResponse { data: joined }))
}

// ---------------------------------------------------------------------------
// GET /lineages/:id/versions
// ---------------------------------------------------------------------------

/// Flat version history of a lineage, newest first.
pub async fn list_history(
    State(state): State<AppState>,
    Path(original_recipe_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe_exists(&state.pool, original_recipe_id).await?;

    let versions = RecipeVersionRepo::list_by_lineage(&state.pool, original_recipe_id).await?;
    let mut joined = Vec::with_capacity(versions.len());
    for version in versions {
        joined.push(with_joins(&state.pool, version).await?);
    }

    Ok(Json(DataResponse { data: joined }))
}

// ---------------------------------------------------------------------------
// GET /lineages/:id/tree
// ---------------------------------------------------------------------------

/// Reconstruct the full branching tree of a lineage.
pub async fn version_tree(
    State(state): State<AppState>,
    Path(original_recipe_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_recipe_exists(&state.pool, original_recipe_id).await?;

    let versions =
        RecipeVersionRepo::list_by_lineage_chronological(&state.pool, original_recipe_id).await?;
    let forest = versioning::build_version_forest(versions, |v| v.id, |v| v.parent_version_id);

    Ok(Json(DataResponse { data: forest }))
}

// ---------------------------------------------------------------------------
// GET /versions/:id/compare/:other_id
// ---------------------------------------------------------------------------

/// Structured diff between two versions' recipe snapshots.
pub async fn compare_versions(
    State(state): State<AppState>,
    Path((id, other_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let base = ensure_version_exists(&state.pool, id).await?;
    let other = ensure_version_exists(&state.pool, other_id).await?;

    let base_recipe = RecipeRepo::find_by_id(&state.pool, base.recipe_id).await?;
    let other_recipe = RecipeRepo::find_by_id(&state.pool, other.recipe_id).await?;
    let (base_recipe, other_recipe) = require_snapshots(base_recipe, other_recipe)?;

    let comparison: VersionComparison =
        versioning::compare_snapshots(&base_recipe.snapshot(), &other_recipe.snapshot());

    Ok(Json(DataResponse { data: comparison }))
}

// ---------------------------------------------------------------------------
// PUT /versions/:id/rating
// ---------------------------------------------------------------------------

/// Record how the cook's attempt went. Only the version's creator may
/// rate it; anyone else sees not-found.
pub async fn rate_version(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<RateVersionRequest>,
) -> AppResult<impl IntoResponse> {
    recipe::validate_success_rating(body.success_rating)?;

    let updated =
        RecipeVersionRepo::set_success_rating(&state.pool, id, auth.user_id, body.success_rating)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "RecipeVersion",
                id,
            }))?;

    tracing::info!(
        version_id = id,
        user_id = auth.user_id,
        rating = body.success_rating,
        "Version rated"
    );

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /versions/:id/changes
// ---------------------------------------------------------------------------

/// Itemized change log recorded when the version was created.
pub async fn list_changes(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_version_exists(&state.pool, id).await?;
    let changes = RecipeChangeRepo::list_by_version(&state.pool, id).await?;
    Ok(Json(DataResponse { data: changes }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
