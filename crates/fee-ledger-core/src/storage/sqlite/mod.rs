//! SQLite storage backend.
//!
//! Both collections live in a single `records` table keyed by collection
//! name. The autoincrement `seq` column preserves insertion order, which the
//! engine relies on for "most recent payment".

mod row;

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OpenFlags};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::notify::{ChangeFeed, Subscription};
use super::traits::{Collection, RecordId, StorageBackend, StoredRecord};
use crate::error::{FeeLedgerError, Result};

use row::RecordRow;

/// On-disk format version written into the `meta` table.
pub const FORMAT_VERSION: &str = "1";

const SCHEMA: &str = r#"
    CREATE TABLE meta (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE records (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        collection TEXT NOT NULL,
        data_json TEXT NOT NULL,
        created_at TEXT NOT NULL
    );

    CREATE INDEX idx_records_collection ON records(collection, seq);
"#;

/// Metadata for a fee ledger database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Format version (e.g., "1")
    pub format_version: String,

    /// When this database was created
    pub created_at: DateTime<Utc>,

    /// Last write timestamp (informational)
    pub last_modified: DateTime<Utc>,
}

/// SQLite-backed document storage.
pub struct SqliteStorage {
    path: Option<PathBuf>,
    conn: Mutex<Connection>,
    feed: ChangeFeed,
}

impl SqliteStorage {
    /// Create a new database file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `FeeLedgerError::Validation` if the file already exists and
    /// `BackendUnavailable` if it cannot be written.
    pub fn create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Err(FeeLedgerError::Validation(format!(
                "Ledger file already exists: {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        tracing::info!(path = %path.display(), "created fee ledger database");
        Ok(Self::wrap(conn, Some(path.to_path_buf())))
    }

    /// Open an existing database file.
    ///
    /// # Errors
    ///
    /// Returns `FeeLedgerError::NotFound` if the file does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FeeLedgerError::NotFound(format!(
                "Ledger file {}",
                path.display()
            )));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let storage = Self::wrap(conn, Some(path.to_path_buf()));
        storage.metadata()?;
        tracing::debug!(path = %path.display(), "opened fee ledger database");
        Ok(storage)
    }

    /// Fresh in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self::wrap(conn, None))
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn wrap(conn: Connection, path: Option<PathBuf>) -> Self {
        Self {
            path,
            conn: Mutex::new(conn),
            feed: ChangeFeed::new(),
        }
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA)?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO meta (key, value) VALUES ('format_version', ?1), ('created_at', ?2), ('last_modified', ?2)",
            params![FORMAT_VERSION, now],
        )?;
        Ok(())
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| FeeLedgerError::BackendUnavailable("SQLite connection poisoned".to_string()))
    }

    fn touch(conn: &Connection) -> Result<()> {
        conn.execute(
            "UPDATE meta SET value = ?1 WHERE key = 'last_modified'",
            params![Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Read database metadata.
    pub fn metadata(&self) -> Result<StoreMetadata> {
        let conn = self.lock_conn()?;
        let read = |key: &str| -> Result<String> {
            Ok(conn.query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
                row.get(0)
            })?)
        };

        let format_version = read("format_version")?;
        let created_at = parse_timestamp(&read("created_at")?)?;
        let last_modified = parse_timestamp(&read("last_modified")?)?;

        Ok(StoreMetadata {
            format_version,
            created_at,
            last_modified,
        })
    }

    /// Check database integrity.
    ///
    /// Verifies SQLite's own consistency check, the required metadata keys
    /// and that every stored document parses as JSON.
    pub fn check_integrity(&self) -> Result<()> {
        let conn = self.lock_conn()?;

        let status: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        if status != "ok" {
            return Err(FeeLedgerError::BackendUnavailable(format!(
                "SQLite integrity check failed: {}",
                status
            )));
        }

        let metadata_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM meta WHERE key IN ('format_version', 'created_at', 'last_modified')",
            [],
            |row| row.get(0),
        )?;
        if metadata_count < 3 {
            return Err(FeeLedgerError::Validation(
                "Metadata table missing required keys".to_string(),
            ));
        }

        let invalid_json: i64 = conn.query_row(
            "SELECT COUNT(*) FROM records WHERE json_valid(data_json) = 0",
            [],
            |row| row.get(0),
        )?;
        if invalid_json > 0 {
            return Err(FeeLedgerError::Validation(format!(
                "{} record(s) hold invalid JSON",
                invalid_json
            )));
        }

        Ok(())
    }

    /// Write a consistent copy of the database to `destination`.
    ///
    /// The copy is produced next to the destination and renamed into place,
    /// so a failed backup never leaves a truncated file behind.
    pub fn backup_to(&self, destination: &Path) -> Result<()> {
        let temp_path = crate::fs::temp_sibling(destination)?;
        let temp_str = temp_path
            .to_str()
            .ok_or_else(|| FeeLedgerError::Validation("Backup path is not UTF-8".to_string()))?;

        {
            let conn = self.lock_conn()?;
            conn.execute("VACUUM INTO ?1", [temp_str])?;
        }

        crate::fs::rename_with_fallback(&temp_path, destination)?;
        tracing::info!(destination = %destination.display(), "backup written");
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(value)
        .map_err(|e| FeeLedgerError::Validation(format!("Invalid timestamp: {}", e)))?
        .with_timezone(&Utc))
}

impl StorageBackend for SqliteStorage {
    fn create(&self, collection: Collection, record: &serde_json::Value) -> Result<RecordId> {
        let id = Uuid::now_v7().to_string();
        let data_json = serde_json::to_string(record)?;
        {
            let conn = self.lock_conn()?;
            conn.execute(
                "INSERT INTO records (id, collection, data_json, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![id, collection.as_str(), data_json, Utc::now().to_rfc3339()],
            )?;
            Self::touch(&conn)?;
        }
        self.feed.publish(collection);
        Ok(RecordId::new(id))
    }

    fn list_all(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt =
            conn.prepare("SELECT id, data_json FROM records WHERE collection = ?1 ORDER BY seq")?;
        let rows = stmt.query_map([collection.as_str()], RecordRow::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            match StoredRecord::try_from(row?) {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!(
                        collection = %collection,
                        error = %err,
                        "skipping undecodable row"
                    );
                }
            }
        }
        Ok(records)
    }

    fn list_ids(&self, collection: Collection) -> Result<Vec<RecordId>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare("SELECT id FROM records WHERE collection = ?1 ORDER BY seq")?;
        let ids = stmt
            .query_map([collection.as_str()], |row| row.get::<_, String>(0))?
            .map(|id| id.map(RecordId::new))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }

    fn delete(&self, collection: Collection, id: &RecordId) -> Result<bool> {
        let removed = {
            let conn = self.lock_conn()?;
            let affected = conn.execute(
                "DELETE FROM records WHERE collection = ?1 AND id = ?2",
                params![collection.as_str(), id.as_str()],
            )?;
            if affected > 0 {
                Self::touch(&conn)?;
            }
            affected > 0
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_round_trip() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage
            .create(Collection::Students, &serde_json::json!({"name": "Asha"}))
            .unwrap();

        let students = storage.list_all(Collection::Students).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, id);
        assert_eq!(students[0].data["name"], "Asha");
        assert!(storage.list_all(Collection::Payments).unwrap().is_empty());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let ids: Vec<RecordId> = (0..5)
            .map(|i| {
                storage
                    .create(Collection::Payments, &serde_json::json!({ "n": i }))
                    .unwrap()
            })
            .collect();

        let listed: Vec<RecordId> = storage
            .list_all(Collection::Payments)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[test]
    fn test_delete_is_scoped_to_collection() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let id = storage
            .create(Collection::Students, &serde_json::json!({}))
            .unwrap();

        assert!(!storage.delete(Collection::Payments, &id).unwrap());
        assert!(storage.delete(Collection::Students, &id).unwrap());
        assert!(!storage.delete(Collection::Students, &id).unwrap());
    }

    #[test]
    fn test_metadata_and_integrity() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let meta = storage.metadata().unwrap();
        assert_eq!(meta.format_version, FORMAT_VERSION);
        assert!(meta.last_modified >= meta.created_at);
        storage.check_integrity().unwrap();
    }
}
