//! Error types for fee ledger operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing notices.

use thiserror::Error;

use crate::storage::PaymentId;

/// Result type alias for fee ledger operations.
pub type Result<T> = std::result::Result<T, FeeLedgerError>;

/// Core error type for fee ledger operations.
#[derive(Debug, Error)]
pub enum FeeLedgerError {
    /// The storage backend could not be reached or failed mid-operation
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Input was rejected before reaching the backend
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The student record was deleted but some of its payments were not.
    #[error(
        "Partial cascade for student {student_id}: {deleted} payment(s) deleted, {} left behind",
        .failed.len()
    )]
    PartialCascade {
        student_id: String,
        deleted: usize,
        failed: Vec<PaymentId>,
    },
}

impl FeeLedgerError {
    /// True for errors raised by the storage backend itself.
    pub fn is_backend(&self) -> bool {
        matches!(self, FeeLedgerError::BackendUnavailable(_))
    }
}

impl From<rusqlite::Error> for FeeLedgerError {
    fn from(err: rusqlite::Error) -> Self {
        FeeLedgerError::BackendUnavailable(err.to_string())
    }
}

impl From<std::io::Error> for FeeLedgerError {
    fn from(err: std::io::Error) -> Self {
        FeeLedgerError::BackendUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for FeeLedgerError {
    fn from(err: serde_json::Error) -> Self {
        FeeLedgerError::Validation(err.to_string())
    }
}
