//! Record row type for database queries.

use crate::error::{FeeLedgerError, Result};
use crate::storage::traits::{RecordId, StoredRecord};

/// Raw row data from the records table, before parsing into a document.
#[derive(Debug)]
pub struct RecordRow {
    pub id: String,
    pub data_json: String,
}

impl RecordRow {
    pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            data_json: row.get(1)?,
        })
    }
}

impl TryFrom<RecordRow> for StoredRecord {
    type Error = FeeLedgerError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let data: serde_json::Value = serde_json::from_str(&row.data_json).map_err(|e| {
            FeeLedgerError::Validation(format!("Invalid JSON in record {}: {}", row.id, e))
        })?;

        Ok(StoredRecord {
            id: RecordId::new(row.id),
            data,
        })
    }
}
