//! Route definitions for the `/recipes` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{recipes, versioning};
use crate::state::AppState;

/// Routes mounted at the API root under `/recipes`.
///
/// ```text
/// GET  /recipes                 -> list published
/// POST /recipes                 -> create draft (requires auth)
/// GET  /recipes/{id}            -> get
/// PUT  /recipes/{id}            -> update (requires auth, owner-scoped)
/// GET  /recipes/{id}/nutrition  -> nutrition estimate
/// POST /recipes/{id}/fork       -> fork lineage (requires auth)
/// GET  /units/convert           -> unit conversion for scaled amounts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/recipes/{id}",
            get(recipes::get_recipe).put(recipes::update_recipe),
        )
        .route("/recipes/{id}/nutrition", get(recipes::recipe_nutrition))
        .route("/recipes/{id}/fork", post(versioning::fork_recipe))
        .route("/units/convert", get(recipes::convert_units))
}
