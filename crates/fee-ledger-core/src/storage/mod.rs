//! Storage abstraction for the fee ledger.
//!
//! This module defines the `StorageBackend` trait and the record types the
//! engine reads and writes.
//!
//! ## Architecture
//!
//! Backends are plain document stores with two collections (`students`,
//! `payments`). They assign identifiers, keep insertion order and may
//! publish change notifications. All ledger rules (balances, cascades)
//! live above this layer.
//!
//! - `MemoryStorage`: in-process, supports fault injection
//! - `SqliteStorage`: single-file SQLite database

pub mod memory;
pub mod notify;
pub mod sqlite;
pub mod traits;
pub mod types;

// Re-export public types
pub use memory::MemoryStorage;
pub use notify::{ChangeEvent, ChangeFeed, Subscription};
pub use sqlite::{SqliteStorage, StoreMetadata};
pub use traits::{Collection, RecordId, StorageBackend, StoredRecord};
pub use types::{NewPayment, NewStudent, Payment, PaymentId, Student, StudentId};
