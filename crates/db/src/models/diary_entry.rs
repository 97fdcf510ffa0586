//! Cooking diary entity model and DTOs.

use chrono::NaiveDate;
use forklore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `diary_entries` table, joined with the creator's display
/// name (entries are always returned denormalized).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DiaryEntry {
    pub id: DbId,
    pub version_id: DbId,
    pub entry_type: String,
    pub content: String,
    pub cooked_on: Option<NaiveDate>,
    pub image_paths: Json<Vec<String>>,
    pub created_by_id: DbId,
    pub creator_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Create DTO
// ---------------------------------------------------------------------------

/// Input for creating a diary entry on a version.
#[derive(Debug, Deserialize)]
pub struct CreateDiaryEntry {
    pub entry_type: String,
    pub content: String,
    pub cooked_on: Option<NaiveDate>,
    #[serde(default)]
    pub image_paths: Vec<String>,
}

// ---------------------------------------------------------------------------
// Update DTO
// ---------------------------------------------------------------------------

/// Input for updating a diary entry. Only content, date, and images are
/// mutable; the entry type and version link are fixed at creation.
#[derive(Debug, Deserialize)]
pub struct UpdateDiaryEntry {
    pub content: Option<String>,
    pub cooked_on: Option<NaiveDate>,
    pub image_paths: Option<Vec<String>>,
}
