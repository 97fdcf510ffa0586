use crate::types::DbId;

/// Domain-level error taxonomy shared by the db and api crates.
///
/// `NotFound` deliberately covers both "row absent" and "row excluded by an
/// ownership filter": mutations scoped to the caller's rows match zero rows
/// either way, and the two causes must stay indistinguishable.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
