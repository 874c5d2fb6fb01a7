//! In-process storage backend.
//!
//! Holds both collections in insertion-ordered vectors. Besides serving as a
//! lightweight backend it can simulate outages, which is how the engine's
//! failure paths are exercised.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::notify::{ChangeFeed, Subscription};
use super::traits::{Collection, RecordId, StorageBackend, StoredRecord};
use crate::error::{FeeLedgerError, Result};

#[derive(Default)]
struct MemoryState {
    students: Vec<StoredRecord>,
    payments: Vec<StoredRecord>,
    offline: bool,
    deletes_remaining: Option<usize>,
}

impl MemoryState {
    fn records(&self, collection: Collection) -> &Vec<StoredRecord> {
        match collection {
            Collection::Students => &self.students,
            Collection::Payments => &self.payments,
        }
    }

    fn records_mut(&mut self, collection: Collection) -> &mut Vec<StoredRecord> {
        match collection {
            Collection::Students => &mut self.students,
            Collection::Payments => &mut self.payments,
        }
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline {
            return Err(FeeLedgerError::BackendUnavailable(
                "memory backend is offline".to_string(),
            ));
        }
        Ok(())
    }
}

/// Vector-backed storage with change notifications.
#[derive(Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
    feed: ChangeFeed,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| FeeLedgerError::BackendUnavailable("memory state poisoned".to_string()))
    }

    /// Make every subsequent call fail with `BackendUnavailable`.
    pub fn set_offline(&self, offline: bool) -> Result<()> {
        self.lock_state()?.offline = offline;
        Ok(())
    }

    /// Allow `n` more deletes, then fail every delete after that.
    pub fn fail_deletes_after(&self, n: usize) -> Result<()> {
        self.lock_state()?.deletes_remaining = Some(n);
        Ok(())
    }

    /// Number of records currently held in `collection`.
    pub fn len(&self, collection: Collection) -> Result<usize> {
        Ok(self.lock_state()?.records(collection).len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        let state = self.lock_state()?;
        Ok(state.students.is_empty() && state.payments.is_empty())
    }
}

impl StorageBackend for MemoryStorage {
    fn create(&self, collection: Collection, record: &serde_json::Value) -> Result<RecordId> {
        let id = {
            let mut state = self.lock_state()?;
            state.ensure_online()?;
            let id = RecordId::new(Uuid::now_v7().to_string());
            state.records_mut(collection).push(StoredRecord {
                id: id.clone(),
                data: record.clone(),
            });
            id
        };
        self.feed.publish(collection);
        Ok(id)
    }

    fn list_all(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
        let state = self.lock_state()?;
        state.ensure_online()?;
        Ok(state.records(collection).clone())
    }

    fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool> {
        let removed = {
            let mut state = self.lock_state()?;
            state.ensure_online()?;
            if let Some(remaining) = state.deletes_remaining {
                if remaining == 0 {
                    return Err(FeeLedgerError::BackendUnavailable(format!(
                        "delete of {} {} interrupted",
                        collection, id
                    )));
                }
                state.deletes_remaining = Some(remaining - 1);
            }

            let records = state.records_mut(collection);
            let before = records.len();
            records.retain(|record| &record.id != id);
            records.len() != before
        };
        if removed {
            self.feed.publish(collection);
        }
        Ok(removed)
    }

    fn subscribe(&self, collection: Collection) -> Option<Subscription> {
        Some(self.feed.subscribe(collection))
    }
}
