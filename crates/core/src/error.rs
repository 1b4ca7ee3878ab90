//! Domain error shared by the database and HTTP layers.

use crate::types::DbId;

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

    /// Too many failed attempts; the caller must wait before retrying.
    #[error("Locked out: {message}")]
    LockedOut { message: String, retry_after_secs: i64 },

    #[error("Internal error: {0}")]
    Internal(String),
}
