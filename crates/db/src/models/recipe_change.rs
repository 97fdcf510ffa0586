//! Recipe change-log entity model and DTOs.

use forklore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `recipe_changes` table: one itemized edit recorded at
/// fork time. Insert-only, never mutated.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeChange {
    pub id: DbId,
    pub version_id: DbId,
    /// One of `added` / `removed` / `modified`.
    pub change_type: String,
    /// One of `ingredient` / `instruction` / `general`.
    pub target: String,
    pub field: Option<String>,
    pub previous_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub reason: Option<String>,
    pub created_at: Timestamp,
}

/// Input for one change-log row, supplied by the fork caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipeChange {
    pub change_type: String,
    pub target: String,
    pub field: Option<String>,
    pub previous_value: Option<serde_json::Value>,
    pub new_value: Option<serde_json::Value>,
    pub reason: Option<String>,
}
