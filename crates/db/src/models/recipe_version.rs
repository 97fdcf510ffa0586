//! Recipe version entity model and DTOs.

use forklore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::recipe::{CreateRecipe, Recipe};
use crate::models::recipe_change::CreateRecipeChange;
use crate::models::user::UserSummary;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `recipe_versions` table.
///
/// `original_recipe_id` identifies the lineage: every version descended
/// from one original recipe shares it. The root version of a lineage has
/// `parent_version_id = NULL`; the database enforces at most one root per
/// lineage via a partial unique index.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeVersion {
    pub id: DbId,
    pub original_recipe_id: DbId,
    pub parent_version_id: Option<DbId>,
    pub recipe_id: DbId,
    pub version_seq: i32,
    /// Server-generated public form, `'v' || version_seq`.
    pub version_number: String,
    pub created_by_id: DbId,
    pub change_summary: String,
    pub is_public: bool,
    pub fork_count: i32,
    pub success_rating: Option<i16>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for inserting a version row. The version sequence number is
/// assigned by the repository, not the caller.
#[derive(Debug, Clone)]
pub struct CreateRecipeVersion {
    pub original_recipe_id: DbId,
    pub parent_version_id: Option<DbId>,
    pub recipe_id: DbId,
    pub change_summary: String,
    pub is_public: bool,
    pub success_rating: Option<i16>,
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for the fork endpoint.
#[derive(Debug, Deserialize)]
pub struct ForkRecipeRequest {
    /// Version being forked; absent when starting a new lineage root.
    pub parent_version_id: Option<DbId>,
    /// The (typically mutated) recipe content the fork snapshots.
    pub recipe: CreateRecipe,
    pub change_summary: String,
    pub is_public: Option<bool>,
    pub success_rating: Option<i16>,
    /// Optional itemized change log, inserted tagged with the new version.
    #[serde(default)]
    pub changes_made: Vec<CreateRecipeChange>,
}

/// Request body for recording a success rating on a version.
#[derive(Debug, Deserialize)]
pub struct RateVersionRequest {
    pub success_rating: i16,
}

/// A version enriched with its recipe snapshot and creator, for detail
/// responses.
#[derive(Debug, Serialize)]
pub struct VersionWithJoins {
    #[serde(flatten)]
    pub version: RecipeVersion,
    pub recipe: Option<Recipe>,
    pub creator: Option<UserSummary>,
}
