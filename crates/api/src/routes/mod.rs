pub mod auth;
pub mod diary;
pub mod health;
pub mod recipes;
pub mod versioning;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                        register (public)
/// /auth/login                           login (public)
/// /auth/me                              current user (requires auth)
///
/// /recipes                              list published, create (auth)
/// /recipes/{id}                         get, update (auth, owner)
/// /recipes/{id}/nutrition               nutrition estimate
/// /recipes/{id}/fork                    fork a lineage (auth, POST)
/// /units/convert                        unit conversion
///
/// /lineages/{id}/versions               flat history, newest first
/// /lineages/{id}/tree                   branching version tree
///
/// /versions/{id}                        version detail with joins
/// /versions/{id}/compare/{other_id}     structured diff
/// /versions/{id}/rating                 rate own version (auth, PUT)
/// /versions/{id}/changes                itemized change log
/// /versions/{id}/diary                  diary list, create (auth)
///
/// /diary/{id}                           update, delete (auth, creator)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(recipes::router())
        .merge(versioning::router())
        .merge(diary::router())
}
