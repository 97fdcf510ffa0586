//! User entity model and DTOs.

use forklore_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `users` table.
///
/// The password hash never leaves the db/api boundary; response types use
/// [`UserSummary`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Public projection of a user for API responses and joins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub display_name: String,
}

/// Input for registering a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub email: String,
    pub display_name: String,
    pub password: String,
}
