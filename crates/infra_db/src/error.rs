//! Database error types and the mapping onto the storage-port error

use core_kernel::StoreError;
use sqlx::error::DatabaseError as _;
use thiserror::Error;

/// Errors raised by pool setup and migrations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Maps SQLx errors onto the storage-port error taxonomy
///
/// Constraint violations are identified by PostgreSQL error code
/// (unique 23505, foreign key 23503, check 23514); connection-level
/// failures stay transient so the poller retries them.
pub fn to_store_error(error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::connection(error.to_string())
        }
        sqlx::Error::Io(e) => StoreError::connection(e.to_string()),
        sqlx::Error::Tls(e) => StoreError::connection(e.to_string()),
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") | Some("23503") | Some("23514") => {
                StoreError::constraint(db_err.message().to_string())
            }
            _ => StoreError::query(db_err.message().to_string()),
        },
        other => StoreError::query(other.to_string()),
    }
}
