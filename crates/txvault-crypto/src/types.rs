/// Envelope scheme version written by `seal`.
///
/// Version 1: AES-256-GCM, random 96-bit nonce, detached 128-bit tag.
/// AAD: [version:1B][recordId length:4B BE][recordId UTF-8][partyId UTF-8]
pub const CURRENT_VERSION: u8 = 1;

/// Envelope versions accepted by `open`.
pub const SUPPORTED_VERSIONS: &[u8] = &[1];

/// AES-GCM nonce length in bytes (96 bits per NIST recommendation).
pub const AES_GCM_NONCE_LENGTH: usize = 12;

/// AES-GCM tag length in bytes (128 bits).
pub const AES_GCM_TAG_LENGTH: usize = 16;

/// AES key length in bytes (256 bits).
pub const AES_KEY_LENGTH: usize = 32;

/// Largest plaintext accepted by `seal` (10 MiB).
pub const MAX_PLAINTEXT_LENGTH: usize = 10 * 1024 * 1024;

/// Context bound into every envelope's tag via AAD.
/// An envelope only opens under the exact record id and party id it was sealed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordContext {
    /// Identifier of the record that owns the envelope.
    pub record_id: String,
    /// Party that submitted the payload.
    pub party_id: String,
}

impl RecordContext {
    pub fn new(record_id: impl Into<String>, party_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            party_id: party_id.into(),
        }
    }
}
