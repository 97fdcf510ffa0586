//! Recipe entity model and DTOs.

use forklore_core::recipe::{Ingredient, Instruction, RecipeSnapshot};
use forklore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
///
/// Ingredient and instruction lists live in JSONB columns, decoded into
/// the core snapshot value types so the diff engine stays strongly typed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: i16,
    pub servings: i32,
    pub total_time_mins: i32,
    pub status: String,
    pub current_version_id: Option<DbId>,
    pub ingredients: Json<Vec<Ingredient>>,
    pub instructions: Json<Vec<Instruction>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Recipe {
    /// Extract the pure content snapshot the diff engine compares.
    pub fn snapshot(&self) -> RecipeSnapshot {
        RecipeSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            subcategory: self.subcategory.clone(),
            difficulty: self.difficulty,
            servings: self.servings,
            total_time_mins: self.total_time_mins,
            ingredients: self.ingredients.0.clone(),
            instructions: self.instructions.0.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a recipe (directly or as a fork snapshot).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecipe {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub subcategory: Option<String>,
    pub difficulty: i16,
    pub servings: i32,
    pub total_time_mins: i32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating an existing recipe (all fields optional).
#[derive(Debug, Deserialize)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub difficulty: Option<i16>,
    pub servings: Option<i32>,
    pub total_time_mins: Option<i32>,
    pub status: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub instructions: Option<Vec<Instruction>>,
}
