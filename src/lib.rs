//! Sealed transaction records.
//!
//! Payloads are sealed into AES-256-GCM envelopes bound to their record id and
//! owning party, stored in a [`RecordStore`], and revealed only after the
//! envelope authenticates under the stored record's own context.

pub mod config;
pub mod error;
pub mod json;
pub mod record;
pub mod service;
pub mod store;

pub use config::VaultConfig;
pub use error::{ErrorKind, Result, StoreError, TxError};
pub use record::Record;
pub use service::{generate_record_id, ServiceOptions, TransactionService};
pub use store::{MemoryRecordStore, RecordStore};

pub use txvault_crypto::{
    CryptoError, DerivedKeyProvider, Envelope, EnvelopeCodec, KeyProvider, MasterSecret,
    RecordContext, SymmetricKey, MAX_PLAINTEXT_LENGTH,
};
