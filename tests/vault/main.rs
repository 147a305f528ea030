//! End-to-end tests against the public txvault API.

mod bootstrap;
mod concurrency;
mod lifecycle;

use txvault::{DerivedKeyProvider, MasterSecret, MemoryRecordStore, TransactionService};

pub fn service() -> TransactionService {
    let keys = DerivedKeyProvider::new(MasterSecret::generate().unwrap()).unwrap();
    TransactionService::new(MemoryRecordStore::new(), keys)
}
