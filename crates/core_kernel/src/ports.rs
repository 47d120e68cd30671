//! Storage-port error type
//!
//! The domain layer talks to persistence through port traits (see
//! `domain_motor::ports`). Every adapter, whether PostgreSQL or the
//! in-memory store used in tests, reports failures through `StoreError`
//! so callers can distinguish transient faults from constraint violations.

use thiserror::Error;

/// Error type for storage-port operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection to the underlying store failed or timed out
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// A query failed to execute
    #[error("Query failed: {message}")]
    Query { message: String },

    /// A database constraint rejected the write
    #[error("Constraint violation: {message}")]
    Constraint { message: String },
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        StoreError::Connection {
            message: message.into(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        StoreError::Query {
            message: message.into(),
        }
    }

    pub fn constraint(message: impl Into<String>) -> Self {
        StoreError::Constraint {
            message: message.into(),
        }
    }

    /// Returns true if this failure may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Connection { .. } | StoreError::Query { .. })
    }
}

/// Marker trait for domain ports
///
/// Port traits extend this marker so implementations are guaranteed to be
/// usable from async tasks.
pub trait DomainPort: Send + Sync + 'static {}
