//! Application error types for core storage and domain logic.
use thiserror::Error;

/// Top-level application error type.
///
/// "Not found" is not a failure: store reads signal a missing row with
/// `Ok(None)`. The [`AppError::NotFound`] variant exists so the HTTP layer
/// can carry that outcome through its error-mapping path.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Not found")]
    NotFound,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}
