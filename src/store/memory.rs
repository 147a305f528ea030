//! MemoryRecordStore: volatile in-memory RecordStore with optional TTL expiry.
//!
//! Point reads take a shared lock; inserts and evictions take the write lock.
//! Locks are only ever held for map access, never across encryption or decryption.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::record::Record;

use super::traits::RecordStore;

/// In-memory record store.
///
/// With a TTL, records at least that old count as evicted: `get` drops them
/// lazily and `purge_expired` sweeps them in bulk.
pub struct MemoryRecordStore {
    /// record id → record
    records: RwLock<HashMap<String, Record>>,
    ttl: Option<Duration>,
}

impl MemoryRecordStore {
    /// Store without expiry. Records live until removed.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl: None,
        }
    }

    /// Store whose records expire `ttl` after creation.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Look up a record as of `now`, evicting it if it has expired.
    pub fn get_at(&self, id: &str, now: DateTime<Utc>) -> Result<Record, StoreError> {
        {
            let records = self.records.read();
            let record = records
                .get(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            match self.ttl {
                Some(ttl) if record.is_expired(ttl, now) => {}
                _ => return Ok(record.clone()),
            }
        }

        // Re-check under the write lock: the entry may have been removed meanwhile
        if let Some(ttl) = self.ttl {
            let mut records = self.records.write();
            if records.get(id).is_some_and(|r| r.is_expired(ttl, now)) {
                records.remove(id);
                tracing::debug!(record_id = id, "evicted expired record on read");
            }
        }
        Err(StoreError::NotFound(id.to_string()))
    }

    /// Remove every record expired at `now`. Returns the number removed.
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|_, record| !record.is_expired(ttl, now));
        let purged = before - records.len();
        if purged > 0 {
            tracing::info!(purged, remaining = records.len(), "purged expired records");
        }
        purged
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for MemoryRecordStore {
    fn put(&self, record: Record) -> Result<(), StoreError> {
        match self.records.write().entry(record.id().to_string()) {
            Entry::Occupied(entry) => Err(StoreError::DuplicateId(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    fn get(&self, id: &str) -> Result<Record, StoreError> {
        self.get_at(id, Utc::now())
    }

    fn remove(&self, id: &str) -> bool {
        self.records.write().remove(id).is_some()
    }
}
