//! Shared store error types for Touchline
//!
//! Every store backend reports failures through [`RepositoryError`], which
//! the domain services lift into the common [`Error`].

use crate::error::Error;
use thiserror::Error;

/// Store-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Store error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::Migration(e) => Error::Internal(format!("Migration failed: {}", e)),
            RepositoryError::InvalidData(msg) => {
                Error::Internal(format!("Invalid stored data: {}", msg))
            }
            RepositoryError::Internal(msg) => Error::Internal(msg),
        }
    }
}
