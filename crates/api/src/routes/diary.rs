//! Route definitions for standalone diary entry operations.

use axum::routing::put;
use axum::Router;

use crate::handlers::diary;
use crate::state::AppState;

/// Routes mounted at the API root under `/diary`.
///
/// Creation and listing live under `/versions/{id}/diary`; only
/// entry-addressed mutation lands here.
///
/// ```text
/// PUT    /diary/{id} -> update (requires auth, creator-scoped)
/// DELETE /diary/{id} -> delete (requires auth, creator-scoped)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/diary/{id}",
        put(diary::update_entry).delete(diary::delete_entry),
    )
}
