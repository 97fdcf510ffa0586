//! Repository for the `users` table.

use forklore_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{User, UserSummary};

/// Column list for users queries.
const COLUMNS: &str = "id, email, display_name, password_hash, role, created_at";

/// Provides account lookup and creation.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with an already-hashed password.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(display_name)
            .bind(password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by primary key.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (login path).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Public projection of a user, for joined responses.
    pub async fn summary_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>("SELECT id, display_name FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
