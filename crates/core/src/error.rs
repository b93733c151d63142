//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// configuration drift, stale indices). Infrastructure concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The factor table and the caller's catalog are out of sync
    /// (unknown scope/category/activity, or malformed factor data).
    /// Fail fast; not user-recoverable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Delete with a stale/out-of-range index; the ledger is left unchanged.
    #[error("index {index} out of range for ledger of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
