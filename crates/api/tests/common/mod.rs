#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use forklore_api::auth::jwt::JwtConfig;
use forklore_api::auth::password::hash_password;
use forklore_api::config::ServerConfig;
use forklore_api::router::build_app_router;
use forklore_api::state::AppState;
use forklore_db::repositories::UserRepo;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret,
/// without touching the environment.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with the production middleware stack,
/// using the given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::put(uri)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(uri)
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a user directly in the database, returning its id and a valid
/// access token for it.
pub async fn create_test_user(pool: &PgPool, email: &str, display_name: &str) -> (i64, String) {
    let hashed = hash_password("test_password_123!").expect("hashing should succeed");
    let user = UserRepo::create(pool, email, display_name, &hashed)
        .await
        .expect("user creation should succeed");
    let token =
        forklore_api::auth::jwt::generate_access_token(user.id, &user.role, &test_config().jwt)
            .expect("token generation should succeed");
    (user.id, token)
}

/// A complete well-formed recipe payload for create/fork requests.
pub fn recipe_payload(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "description": "A reliable weeknight dish",
        "category": "main",
        "subcategory": null,
        "difficulty": 2,
        "servings": 4,
        "total_time_mins": 45,
        "ingredients": [
            { "id": "flour", "name": "Flour", "amount": "200", "unit": "g", "optional": false },
            { "id": "egg", "name": "Egg", "amount": "2", "unit": "pcs", "optional": false }
        ],
        "instructions": [
            { "id": "mix", "step_number": 1, "text": "Mix everything", "image_path": null },
            { "id": "bake", "step_number": 2, "text": "Bake at 180C", "image_path": null }
        ]
    })
}

/// Create a recipe through the API and return its id.
pub async fn create_recipe_via_api(app: Router, token: &str, name: &str) -> i64 {
    let response = post_json_auth(app, "/api/v1/recipes", token, recipe_payload(name)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("recipe id")
}
