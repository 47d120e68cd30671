//! Core error types used across the system

use thiserror::Error;

use crate::ports::StoreError;
use crate::temporal::TemporalError;

/// Domain error taxonomy
///
/// Synchronous operations surface `InvalidInput`, `NotFound`, and `Conflict`
/// directly to their caller. `Storage` wraps transient storage failures; the
/// background poller retries those, everything else does not.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{field}: {message}")]
    InvalidInput { field: &'static str, message: String },

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl DomainError {
    pub fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        DomainError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        DomainError::NotFound { entity, id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    /// Returns true if retrying the operation later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, DomainError::Storage(e) if e.is_transient())
    }
}

impl From<TemporalError> for DomainError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::InvalidRange { .. } => {
                DomainError::invalid_input("StartDate", err.to_string())
            }
            TemporalError::InvalidTimezone(_) => {
                DomainError::invalid_input("Timezone", err.to_string())
            }
        }
    }
}
