//! Route definitions for lineages and versions.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{diary, versioning};
use crate::state::AppState;

/// Routes mounted at the API root under `/lineages` and `/versions`.
///
/// A lineage is addressed by its original recipe's id.
///
/// ```text
/// GET /lineages/{id}/versions            -> flat history, newest first
/// GET /lineages/{id}/tree                -> branching version tree
///
/// GET /versions/{id}                     -> version detail with joins
/// GET /versions/{id}/compare/{other_id}  -> structured diff
/// PUT /versions/{id}/rating              -> rate own version (requires auth)
/// GET /versions/{id}/changes             -> itemized change log
/// GET /versions/{id}/diary               -> diary list
/// POST /versions/{id}/diary              -> add diary entry (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/lineages/{id}/versions", get(versioning::list_history))
        .route("/lineages/{id}/tree", get(versioning::version_tree))
        .route("/versions/{id}", get(versioning::get_version))
        .route(
            "/versions/{id}/compare/{other_id}",
            get(versioning::compare_versions),
        )
        .route("/versions/{id}/rating", put(versioning::rate_version))
        .route("/versions/{id}/changes", get(versioning::list_changes))
        .route(
            "/versions/{id}/diary",
            get(diary::list_entries).post(diary::create_entry),
        )
}
