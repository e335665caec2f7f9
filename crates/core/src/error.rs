//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// conflicts, missing entities). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation or a precondition (e.g. non-positive price,
    /// deleting an order that is no longer PENDING).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced entity was not found.
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. duplicate SKU, insufficient stock).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The caller failed the webhook signature check.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
