//! Handlers for registration, login, and the current-user endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use forklore_core::error::CoreError;
use forklore_db::models::user::{CreateUser, UserSummary};
use forklore_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for register/login: the access token plus the user it names.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub user: UserSummary,
}

// ---------------------------------------------------------------------------
// POST /auth/register
// ---------------------------------------------------------------------------

/// Register a new account and log it in.
///
/// A duplicate email surfaces as 409 via the unique-constraint classifier.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CreateUser>,
) -> AppResult<impl IntoResponse> {
    if body.password.len() < 8 {
        return Err(AppError::Core(CoreError::Validation(
            "Password must be at least 8 characters".to_string(),
        )));
    }
    let password_hash = hash_password(&body.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {e}")))?;

    let user = UserRepo::create(&state.pool, &body.email, &body.display_name, &password_hash)
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TokenResponse {
                token,
                user: UserSummary {
                    id: user.id,
                    display_name: user.display_name,
                },
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// POST /auth/login
// ---------------------------------------------------------------------------

/// Exchange credentials for an access token.
///
/// Unknown email and wrong password return the same message, so the
/// endpoint cannot be used to probe which addresses have accounts.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = UserRepo::find_by_email(&state.pool, &body.email).await?;

    let user = match user {
        Some(user) if verify_password(&body.password, &user.password_hash) => user,
        _ => {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid email or password".to_string(),
            )))
        }
    };

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(DataResponse {
        data: TokenResponse {
            token,
            user: UserSummary {
                id: user.id,
                display_name: user.display_name,
            },
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /auth/me
// ---------------------------------------------------------------------------

/// Return the authenticated caller's public profile.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> AppResult<impl IntoResponse> {
    let summary = UserRepo::summary_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(DataResponse { data: summary }))
}
