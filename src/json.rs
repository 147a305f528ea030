//! JSON payload helpers.
//!
//! The codec only ever sees opaque bytes. JSON is serialized here before
//! sealing and parsed here only after a reveal has authenticated.

use serde_json::Value;
use txvault_crypto::KeyProvider;
use zeroize::Zeroizing;

use crate::error::{Result, TxError};
use crate::record::Record;
use crate::service::TransactionService;
use crate::store::RecordStore;

impl<S: RecordStore, K: KeyProvider> TransactionService<S, K> {
    /// Seal a JSON payload. `null` counts as a missing payload.
    pub fn seal_json(&self, party_id: &str, payload: &Value) -> Result<Record> {
        if payload.is_null() {
            return Err(TxError::InvalidInput("payload is required".into()));
        }
        let bytes = Zeroizing::new(serde_json::to_vec(payload)?);
        self.seal(party_id, &bytes)
    }

    /// Reveal a record and parse its plaintext as JSON.
    pub fn reveal_json(&self, id: &str) -> Result<Value> {
        let plaintext = Zeroizing::new(self.reveal(id)?);
        Ok(serde_json::from_slice(&plaintext)?)
    }
}
