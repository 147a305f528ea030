//! TransactionService: seals payloads into records and reveals them again.
//!
//! Record lifecycle: Created (seal) → Readable (fetch/reveal, non-mutating)
//! → Evicted (remove or TTL expiry; all reads report NotFound afterwards).

use std::sync::Arc;

use chrono::Utc;
use txvault_crypto::{CryptoError, DerivedKeyProvider, EnvelopeCodec, KeyProvider, RecordContext};

use crate::config::VaultConfig;
use crate::error::{Result, TxError};
use crate::record::Record;
use crate::store::{MemoryRecordStore, RecordStore};

/// Generate a random UUID (v4) record id.
pub fn generate_record_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Options controlling record creation.
#[derive(Clone, Default)]
pub struct ServiceOptions {
    /// Record id generator. Defaults to `generate_record_id()`.
    /// Must never repeat an id; a repeat surfaces as `DuplicateId`.
    pub generate_id: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

/// Orchestrates id generation, sealing, storage, and reveal.
pub struct TransactionService<S = MemoryRecordStore, K = DerivedKeyProvider> {
    codec: EnvelopeCodec<K>,
    store: S,
    generate_id: Arc<dyn Fn() -> String + Send + Sync>,
}

impl TransactionService<MemoryRecordStore, DerivedKeyProvider> {
    /// Bootstrap the memory-backed service from process configuration.
    ///
    /// Fails with `KeyUnavailable` if the master secret cannot produce a key.
    pub fn from_config(config: &VaultConfig) -> Result<Self> {
        let keys = DerivedKeyProvider::new(config.master_secret().clone())?;
        let store = match config.record_ttl() {
            Some(ttl) => MemoryRecordStore::with_ttl(ttl),
            None => MemoryRecordStore::new(),
        };
        tracing::info!(
            record_ttl_secs = config.record_ttl().map(|ttl| ttl.as_secs()),
            "key provider ready"
        );
        Ok(Self::new(store, keys))
    }

    /// Drop every record whose TTL has elapsed. Returns the number removed.
    pub fn purge_expired(&self) -> usize {
        self.store.purge_expired(Utc::now())
    }
}

impl<S: RecordStore, K: KeyProvider> TransactionService<S, K> {
    pub fn new(store: S, keys: K) -> Self {
        Self::with_options(store, keys, ServiceOptions::default())
    }

    pub fn with_options(store: S, keys: K, options: ServiceOptions) -> Self {
        let generate_id: Arc<dyn Fn() -> String + Send + Sync> = match options.generate_id {
            Some(generate) => generate,
            None => Arc::new(generate_record_id),
        };
        Self {
            codec: EnvelopeCodec::new(keys),
            store,
            generate_id,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn codec(&self) -> &EnvelopeCodec<K> {
        &self.codec
    }

    /// Seal `payload` for `party_id` under a fresh record id and store it.
    ///
    /// Returns the record in ciphertext form, safe to hand to external callers.
    pub fn seal(&self, party_id: &str, payload: &[u8]) -> Result<Record> {
        if party_id.trim().is_empty() {
            return Err(TxError::InvalidInput("partyId is required".into()));
        }
        if payload.is_empty() {
            return Err(TxError::InvalidInput("payload is required".into()));
        }

        let id = (self.generate_id)();
        let context = RecordContext::new(id.clone(), party_id);
        // Sealed before the store lock is taken
        let envelope = self.codec.seal(payload, &context)?;
        let record = Record::new(id, party_id.to_string(), Utc::now(), envelope);

        if let Err(err) = self.store.put(record.clone()) {
            tracing::error!(record_id = record.id(), error = %err, "record id collision");
            return Err(err.into());
        }

        tracing::debug!(
            record_id = record.id(),
            party_id,
            payload_len = payload.len(),
            "sealed record"
        );
        Ok(record)
    }

    /// Return the stored record without decrypting it.
    pub fn fetch_encrypted(&self, id: &str) -> Result<Record> {
        Ok(self.store.get(id)?)
    }

    /// Decrypt a stored record.
    ///
    /// The context comes from the stored record itself, never from the caller,
    /// so a caller cannot ask for decryption under a forged record id or party.
    pub fn reveal(&self, id: &str) -> Result<Vec<u8>> {
        let record = self.store.get(id)?;
        match self.codec.open(record.envelope(), &record.context()) {
            Ok(plaintext) => {
                tracing::debug!(
                    record_id = id,
                    party_id = record.party_id(),
                    payload_len = plaintext.len(),
                    "revealed record"
                );
                Ok(plaintext)
            }
            Err(CryptoError::AuthenticationFailed) => {
                tracing::warn!(record_id = id, "record failed authentication");
                Err(CryptoError::AuthenticationFailed.into())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Evict a record. Returns whether it was present.
    pub fn evict(&self, id: &str) -> bool {
        let removed = self.store.remove(id);
        if removed {
            tracing::debug!(record_id = id, "evicted record");
        }
        removed
    }
}
