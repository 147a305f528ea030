//! RecordStore trait: the storage seam behind TransactionService.

use std::sync::Arc;

use crate::error::StoreError;
use crate::record::Record;

/// Maps record ids to sealed records. No cryptography happens here.
///
/// Implementations must be linearizable per id: a `get` that starts after a
/// `put` for the same id has returned always observes that record.
pub trait RecordStore: Send + Sync {
    /// Insert a record under its id. Fails with `DuplicateId` if the id is taken.
    fn put(&self, record: Record) -> Result<(), StoreError>;

    /// Look up a record by id.
    fn get(&self, id: &str) -> Result<Record, StoreError>;

    /// Evict a record. Returns whether a record was present.
    fn remove(&self, id: &str) -> bool;
}

impl<S: RecordStore + ?Sized> RecordStore for Arc<S> {
    fn put(&self, record: Record) -> Result<(), StoreError> {
        (**self).put(record)
    }

    fn get(&self, id: &str) -> Result<Record, StoreError> {
        (**self).get(id)
    }

    fn remove(&self, id: &str) -> bool {
        (**self).remove(id)
    }
}
