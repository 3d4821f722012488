//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Domain types reject invalid input silently by default; this error is what
/// their `try_*` variants report instead, so callers can tell a rejected
/// write from an accepted one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. a non-finite cost).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant would have been violated.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A requested member was not found.
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
