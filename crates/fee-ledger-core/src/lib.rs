//! # Fee Ledger Core
//!
//! Core library for tracking students and their meal-fee payments.
//!
//! This crate provides the record model, the storage backend abstraction and
//! the ledger engine, independent of any user interface.
//!
//! ## Architecture
//!
//! - **storage**: Backend trait, record types, in-memory and SQLite backends
//! - **engine**: Snapshots, aggregates, search, cascade delete, audit
//! - **amount**: Lenient money parsing and two-place display rounding
//! - **fs**: Atomic file writes for exports and backups

pub mod amount;
pub mod engine;
pub mod error;
pub mod fs;
pub mod storage;

pub use engine::{FeeLedger, Snapshot};
pub use error::{FeeLedgerError, Result};
pub use storage::StorageBackend;

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
