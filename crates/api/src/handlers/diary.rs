//! Handlers for cooking diary entries attached to versions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use forklore_core::diary::{self, DiaryEntryType};
use forklore_core::error::CoreError;
use forklore_core::types::DbId;
use forklore_db::models::diary_entry::{CreateDiaryEntry, UpdateDiaryEntry};
use forklore_db::repositories::{DiaryEntryRepo, RecipeVersionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /versions/:id/diary
// ---------------------------------------------------------------------------

/// Add a diary entry to a version.
pub async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(version_id): Path<DbId>,
    Json(body): Json<CreateDiaryEntry>,
) -> AppResult<impl IntoResponse> {
    DiaryEntryType::from_str(&body.entry_type)?;
    diary::validate_diary_content(&body.content)?;
    diary::validate_diary_images(&body.image_paths)?;

    if RecipeVersionRepo::find_by_id(&state.pool, version_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RecipeVersion",
            id: version_id,
        }));
    }

    let entry = DiaryEntryRepo::create(&state.pool, version_id, auth.user_id, &body).await?;

    tracing::info!(
        entry_id = entry.id,
        version_id,
        user_id = auth.user_id,
        entry_type = %body.entry_type,
        "Diary entry created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

// ---------------------------------------------------------------------------
// GET /versions/:id/diary
// ---------------------------------------------------------------------------

/// List a version's diary, newest first.
pub async fn list_entries(
    State(state): State<AppState>,
    Path(version_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if RecipeVersionRepo::find_by_id(&state.pool, version_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "RecipeVersion",
            id: version_id,
        }));
    }

    let entries = DiaryEntryRepo::list_by_version(&state.pool, version_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// PUT /diary/:id
// ---------------------------------------------------------------------------

/// Update an entry. The creator filter in the repository is the
/// authorization check: foreign-owned entries report not-found.
pub async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateDiaryEntry>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref content) = body.content {
        diary::validate_diary_content(content)?;
    }
    if let Some(ref images) = body.image_paths {
        diary::validate_diary_images(images)?;
    }

    let updated = DiaryEntryRepo::update(&state.pool, id, auth.user_id, &body)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "DiaryEntry",
            id,
        }))?;

    tracing::info!(entry_id = id, user_id = auth.user_id, "Diary entry updated");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// DELETE /diary/:id
// ---------------------------------------------------------------------------

/// Delete an entry, scoped to its creator.
pub async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = DiaryEntryRepo::delete(&state.pool, id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "DiaryEntry",
            id,
        }));
    }

    tracing::info!(entry_id = id, user_id = auth.user_id, "Diary entry deleted");

    Ok(StatusCode::NO_CONTENT)
}
