//! Stored record: an envelope plus its owning party, id, and creation time.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use txvault_crypto::{Envelope, RecordContext};

/// A sealed record in its ciphertext form.
///
/// Serializes as `{ id, partyId, createdAt, version, nonce, ciphertext, tag }`.
/// Only the seal path constructs records; they are never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    id: String,
    party_id: String,
    #[serde(serialize_with = "serialize_timestamp")]
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    envelope: Envelope,
}

/// ISO 8601 with millisecond precision, e.g. `2026-10-19T08:30:00.123Z`.
fn serialize_timestamp<S: Serializer>(
    ts: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Record {
    pub(crate) fn new(
        id: String,
        party_id: String,
        created_at: DateTime<Utc>,
        envelope: Envelope,
    ) -> Self {
        Self {
            id,
            party_id,
            created_at,
            envelope,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn party_id(&self) -> &str {
        &self.party_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Context the envelope was sealed under, rebuilt from the record's own fields.
    pub fn context(&self) -> RecordContext {
        RecordContext::new(self.id.clone(), self.party_id.clone())
    }

    /// Whether the record is at least `ttl` old at `now`.
    /// Records stamped in the future are never expired.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match (now - self.created_at).to_std() {
            Ok(age) => age >= ttl,
            Err(_) => false,
        }
    }
}
