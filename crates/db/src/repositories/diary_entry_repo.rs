//! Repository for the `diary_entries` table.
//!
//! All rows come back joined with the creator's display name, and every
//! mutation is filtered by `created_by_id` in the same statement -- the
//! filter IS the authorization check. A foreign-owned id matches zero
//! rows, indistinguishable from a missing one.

use forklore_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::diary_entry::{CreateDiaryEntry, DiaryEntry, UpdateDiaryEntry};

/// Column list for the joined diary entry projection.
const COLUMNS: &str = "d.id, d.version_id, d.entry_type, d.content, d.cooked_on, \
    d.image_paths, d.created_by_id, u.display_name AS creator_name, \
    d.created_at, d.updated_at";

/// Provides creator-scoped CRUD for cooking diary entries.
pub struct DiaryEntryRepo;

impl DiaryEntryRepo {
    /// Insert a diary entry, returning it with the creator join resolved.
    pub async fn create(
        pool: &PgPool,
        version_id: DbId,
        user_id: DbId,
        input: &CreateDiaryEntry,
    ) -> Result<DiaryEntry, sqlx::Error> {
        let query = format!(
            "WITH d AS (
                INSERT INTO diary_entries
                    (version_id, entry_type, content, cooked_on, image_paths, created_by_id)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
             )
             SELECT {COLUMNS} FROM d JOIN users u ON u.id = d.created_by_id"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(version_id)
            .bind(&input.entry_type)
            .bind(&input.content)
            .bind(input.cooked_on)
            .bind(Json(&input.image_paths))
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Partial-update an entry's content, date, or images, scoped to its
    /// creator. Returns `None` when the id is absent or foreign-owned.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateDiaryEntry,
    ) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!(
            "WITH d AS (
                UPDATE diary_entries SET
                    content = COALESCE($3, content),
                    cooked_on = COALESCE($4, cooked_on),
                    image_paths = COALESCE($5, image_paths),
                    updated_at = NOW()
                WHERE id = $1 AND created_by_id = $2
                RETURNING *
             )
             SELECT {COLUMNS} FROM d JOIN users u ON u.id = d.created_by_id"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.content)
            .bind(input.cooked_on)
            .bind(input.image_paths.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    /// Delete an entry, scoped to its creator. Returns `true` if a row was
    /// deleted.
    pub async fn delete(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM diary_entries WHERE id = $1 AND created_by_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a version's entries, newest first.
    pub async fn list_by_version(
        pool: &PgPool,
        version_id: DbId,
    ) -> Result<Vec<DiaryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diary_entries d
             JOIN users u ON u.id = d.created_by_id
             WHERE d.version_id = $1
             ORDER BY d.created_at DESC, d.id DESC"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(version_id)
            .fetch_all(pool)
            .await
    }

    /// Fetch one entry by id with the creator join (no ownership filter --
    /// reads are public).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DiaryEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM diary_entries d
             JOIN users u ON u.id = d.created_by_id
             WHERE d.id = $1"
        );
        sqlx::query_as::<_, DiaryEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
