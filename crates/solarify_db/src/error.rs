//! Error types for the database client

use solarify_common::SolarifyError;
use thiserror::Error;

/// Errors that can occur when working with the database client
#[derive(Debug, Error)]
pub enum DbError {
    /// Error from SQLx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Error with the database configuration
    #[error("Database configuration error: {0}")]
    ConfigError(String),

    /// Error with database URL parsing
    #[error("Database URL error: {0}")]
    UrlError(String),

    /// Error with database pool creation
    #[error("Database pool error: {0}")]
    PoolError(String),

    /// Error with database query
    #[error("Database query error: {0}")]
    QueryError(String),

    /// Error with database transaction
    #[error("Database transaction error: {0}")]
    TransactionError(String),

    /// A row the operation requires does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation lost against the current row state
    /// (duplicate key, insufficient stock, illegal status transition)
    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<DbError> for SolarifyError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(message) => SolarifyError::NotFoundError(message),
            DbError::Conflict(message) => SolarifyError::ConflictError(message),
            other => SolarifyError::DatabaseError(other.to_string()),
        }
    }
}
