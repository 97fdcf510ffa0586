//! Shared response envelope for API handlers.
//!
//! Every success response is wrapped in `{ "data": ... }`; use
//! [`DataResponse`] rather than ad-hoc `serde_json::json!` maps so the
//! payload type stays checked at compile time.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
