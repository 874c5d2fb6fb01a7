//! Storage backend trait definition.
//!
//! The `StorageBackend` trait is the document-store contract every
//! persistence layer implements. The ledger engine only ever talks to this
//! trait, so the same balance and cascade rules run against any backend.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::notify::Subscription;
use crate::error::Result;

/// The two logical collections held by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Students,
    Payments,
}

impl Collection {
    /// Collection name as stored by backends.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Students => "students",
            Collection::Payments => "payments",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque backend-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A raw document as held by a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Identifier assigned on creation
    pub id: RecordId,

    /// Document body (JSON object)
    pub data: serde_json::Value,
}

/// Storage backend interface.
///
/// All implementations must ensure:
/// - Identifiers are assigned by the backend and never reused
/// - `list_all` returns records in insertion order
/// - A failed call leaves previously committed records untouched
pub trait StorageBackend: Send + Sync {
    /// Insert a document into a collection.
    ///
    /// # Returns
    ///
    /// Returns the identifier assigned to the new record.
    ///
    /// # Errors
    ///
    /// Returns `FeeLedgerError::BackendUnavailable` if the write fails.
    fn create(&self, collection: Collection, record: &serde_json::Value) -> Result<RecordId>;

    /// List every readable record of a collection in insertion order.
    ///
    /// Rows whose body cannot be decoded are skipped with a warning.
    fn list_all(&self, collection: Collection) -> Result<Vec<StoredRecord>>;

    /// Identifiers of every stored record, readable or not.
    fn list_ids(&self, collection: Collection) -> Result<Vec<RecordId>> {
        Ok(self
            .list_all(collection)?
            .into_iter()
            .map(|record| record.id)
            .collect())
    }

    /// Delete a record by identifier.
    ///
    /// # Returns
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if no record
    /// with that identifier exists.
    fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool>;

    /// Subscribe to change notifications for a collection.
    ///
    /// Backends without live updates return `None`.
    fn subscribe(&self, _collection: Collection) -> Option<Subscription> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_is_object_safe() {
        fn _accepts_dyn(_backend: &dyn StorageBackend) {}
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Collection::Students.to_string(), "students");
        assert_eq!(Collection::Payments.as_str(), "payments");
    }

    #[test]
    fn test_record_id_serializes_transparently() {
        let id = RecordId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
