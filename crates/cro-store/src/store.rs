use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use cro_core::ReportRecord;

use crate::error::StorageError;
use crate::slot::{FileSlot, MemorySlot, ReportSlot};

/// Whether an insert reached durable storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Durability {
    /// The updated history was written to the slot.
    Durable,
    /// The write failed; the record exists only in the caller's hands and the
    /// persisted history may be incomplete.
    NonDurable,
}

impl Durability {
    #[must_use]
    pub const fn is_durable(self) -> bool {
        matches!(self, Self::Durable)
    }
}

/// Bounded, ordered collection of report records.
///
/// Invariants upheld by every public operation:
/// - at most `capacity` records are retained;
/// - [`Self::list`] returns records by `created_at`, newest first;
/// - inserting evicts the oldest records beyond capacity;
/// - records are never deduplicated by URL or ID.
///
/// `insert` and `clear` serialize their read-modify-write cycle on an
/// internal lock, so one store instance may be shared across tasks.
pub struct ReportStore {
    slot: Box<dyn ReportSlot>,
    capacity: usize,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStore")
            .field("slot", &self.slot.describe())
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl ReportStore {
    /// Create a store over an arbitrary slot. A capacity of zero is raised to one.
    pub fn new(slot: impl ReportSlot + 'static, capacity: usize) -> Self {
        Self {
            slot: Box::new(slot),
            capacity: capacity.max(1),
            write_lock: Mutex::new(()),
        }
    }

    /// Store backed by a JSON file at `path`.
    pub fn open_file(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self::new(FileSlot::new(path), capacity)
    }

    /// Non-durable store; history lasts as long as the process.
    #[must_use]
    pub fn in_memory(capacity: usize) -> Self {
        Self::new(MemorySlot::new(), capacity)
    }

    /// Retention capacity (`MAX_REPORTS`).
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// All retained records, newest first.
    ///
    /// Never fails: an empty, unreadable or corrupt slot yields an empty list.
    #[must_use]
    pub fn list(&self) -> Vec<ReportRecord> {
        self.load()
    }

    /// Look up a record by ID. `None` is a normal outcome.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<ReportRecord> {
        self.load().into_iter().find(|record| record.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Prepend `record`, evicting the oldest records beyond capacity.
    ///
    /// A failed read or write is logged and reported as
    /// [`Durability::NonDurable`]; it never propagates. When the slot cannot
    /// be read the existing history is left untouched.
    pub fn insert(&self, record: &ReportRecord) -> Durability {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut records = match self.read_history() {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(
                    %error,
                    slot = %self.slot.describe(),
                    id = %record.id,
                    "report history unreadable; skipping write so it is not overwritten"
                );
                return Durability::NonDurable;
            }
        };
        records.insert(0, record.clone());
        sort_newest_first(&mut records);

        if records.len() > self.capacity {
            let evicted = records.split_off(self.capacity);
            for old in &evicted {
                tracing::debug!(id = %old.id, created_at = %old.created_at, "evicting report beyond capacity");
            }
        }

        match self.persist(&records) {
            Ok(()) => Durability::Durable,
            Err(error) => {
                tracing::warn!(
                    %error,
                    slot = %self.slot.describe(),
                    id = %record.id,
                    "failed to persist report history; record is not durable"
                );
                Durability::NonDurable
            }
        }
    }

    /// Delete the whole history. Not part of normal operation.
    pub fn clear(&self) -> Durability {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        match self.slot.clear() {
            Ok(()) => Durability::Durable,
            Err(error) => {
                tracing::warn!(%error, slot = %self.slot.describe(), "failed to clear report history");
                Durability::NonDurable
            }
        }
    }

    /// Creation timestamp for the next record produced through this store.
    ///
    /// Returns `now`, or the newest retained `created_at` if the clock has
    /// gone backwards, so timestamps stay non-decreasing.
    #[must_use]
    pub fn stamp(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.load()
            .first()
            .map_or(now, |newest| now.max(newest.created_at))
    }

    fn persist(&self, records: &[ReportRecord]) -> Result<(), StorageError> {
        let contents = serde_json::to_string(records)?;
        self.slot.write(&contents)
    }

    fn load(&self) -> Vec<ReportRecord> {
        self.read_history().unwrap_or_else(|error| {
            tracing::warn!(%error, slot = %self.slot.describe(), "report history unreadable; treating as empty");
            Vec::new()
        })
    }

    /// Retained records, or the slot's read error. Absent and corrupt
    /// contents both decode to an empty history.
    fn read_history(&self) -> Result<Vec<ReportRecord>, StorageError> {
        let Some(raw) = self.slot.read()? else {
            return Ok(Vec::new());
        };

        let mut records = decode_history(&raw, &self.slot.describe());
        sort_newest_first(&mut records);
        records.truncate(self.capacity);
        Ok(records)
    }
}

/// Decode the slot contents, dropping entries that fail to parse or validate.
fn decode_history(raw: &str, slot: &str) -> Vec<ReportRecord> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(%error, slot, "report history is corrupt; treating as empty");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| {
            let record = match serde_json::from_value::<ReportRecord>(entry) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!(%error, slot, "skipping malformed report entry");
                    return None;
                }
            };
            if let Err(error) = record.validate() {
                tracing::warn!(%error, slot, id = %record.id, "skipping invalid report entry");
                return None;
            }
            Some(record)
        })
        .collect()
}

/// Stable sort by `created_at`, newest first. Ties keep their current order.
fn sort_newest_first(records: &mut [ReportRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
