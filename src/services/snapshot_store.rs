//! Persistence layer for URLForge.
//!
//! The builder state is serialized as JSON into a single named slot in the
//! SQLite `storage_slots` table and fully overwritten on every save. A
//! missing or malformed slot loads as absent — malformed data is logged,
//! never surfaced, and never fails initialization.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::params;

use crate::database::connection::Database;
use crate::types::builder::BuilderSnapshot;
use crate::types::errors::StorageError;

/// Name of the slot holding the persisted builder state.
pub const STATE_SLOT: &str = "builder_state";

/// Trait defining the snapshot persistence interface.
pub trait SnapshotStoreTrait {
    fn save(&self, snapshot: &BuilderSnapshot) -> Result<(), StorageError>;
    fn load(&self) -> Option<BuilderSnapshot>;
    fn clear(&self) -> Result<(), StorageError>;
    fn has_snapshot(&self) -> bool;
}

/// Snapshot store backed by the SQLite storage slot table.
pub struct SnapshotStore {
    db: Arc<Database>,
    slot: String,
}

impl SnapshotStore {
    /// Creates a store writing to the standard builder-state slot.
    pub fn new(db: Arc<Database>) -> Self {
        Self::with_slot(db, STATE_SLOT)
    }

    /// Creates a store writing to a custom slot name (used by tests).
    pub fn with_slot(db: Arc<Database>, slot: &str) -> Self {
        Self {
            db,
            slot: slot.to_string(),
        }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    fn read_slot(&self) -> Result<Option<String>, rusqlite::Error> {
        let conn = self.db.connection();
        match conn.query_row(
            "SELECT value FROM storage_slots WHERE slot = ?1",
            params![self.slot],
            |row| row.get::<_, String>(0),
        ) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

impl SnapshotStoreTrait for SnapshotStore {
    /// Serializes the snapshot and fully overwrites the slot.
    ///
    /// Rows where both key and value are empty are dropped before writing;
    /// they carry no information worth restoring.
    fn save(&self, snapshot: &BuilderSnapshot) -> Result<(), StorageError> {
        let filtered = BuilderSnapshot {
            base_url: snapshot.base_url.clone(),
            params: snapshot
                .params
                .iter()
                .filter(|p| !p.is_blank())
                .cloned()
                .collect(),
        };

        let json = serde_json::to_string(&filtered)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO storage_slots (slot, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![self.slot, json, Self::now()],
        )
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Reads the slot back into a snapshot.
    ///
    /// Returns `None` when the slot is absent or its content fails to parse;
    /// the caller proceeds with the default empty state. Malformed content is
    /// logged and left in place — the next save overwrites it.
    fn load(&self) -> Option<BuilderSnapshot> {
        let raw = match self.read_slot() {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("failed to read slot '{}': {}", self.slot, e);
                return None;
            }
        };

        match serde_json::from_str::<BuilderSnapshot>(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::warn!("malformed snapshot in slot '{}': {}", self.slot, e);
                None
            }
        }
    }

    /// Removes the slot entirely.
    fn clear(&self) -> Result<(), StorageError> {
        let conn = self.db.connection();
        conn.execute(
            "DELETE FROM storage_slots WHERE slot = ?1",
            params![self.slot],
        )
        .map_err(|e| StorageError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    fn has_snapshot(&self) -> bool {
        matches!(self.read_slot(), Ok(Some(_)))
    }
}
