//! Domain error model.

use thiserror::Error;

use crate::validation::Violations;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// `NotFound`, `Validation` and `InvalidId` are caller errors and are never
/// retried. `Unexpected` flattens everything else (store failures, decode
/// failures) into a message that stays on the server side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No row matches the supplied identifier.
    #[error("{entity} not found with id: {id}")]
    NotFound { entity: &'static str, id: String },

    /// One or more field constraints were violated.
    #[error("validation failed: {0}")]
    Validation(Violations),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Anything the caller could not have caused.
    #[error("unexpected failure: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self::Unexpected(msg.into())
    }

    /// True for failures caused by the caller's input (4xx territory).
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, Self::Unexpected(_))
    }
}

impl From<Violations> for DomainError {
    fn from(value: Violations) -> Self {
        Self::Validation(value)
    }
}
