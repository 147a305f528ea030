//! AES-256-GCM record envelopes.
//!
//! Transport form (JSON, byte fields base64url without padding):
//! { "version": 1, "nonce": <12B>, "ciphertext": <N B>, "tag": <16B> }
//!
//! The record context is never stored in the envelope. It is rebuilt by the
//! caller on open and bound through AAD, so an envelope moved to another
//! record id or party fails authentication.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::CryptoError;
use crate::key::KeyProvider;
use crate::types::{
    RecordContext, AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, CURRENT_VERSION,
    MAX_PLAINTEXT_LENGTH, SUPPORTED_VERSIONS,
};

/// Build AAD from the scheme version and record context.
/// Format: [1 byte: version][4 bytes: recordId length (u32 BE)][recordId UTF-8][partyId UTF-8]
fn build_aad(version: u8, context: &RecordContext) -> Vec<u8> {
    let record_bytes = context.record_id.as_bytes();
    let party_bytes = context.party_id.as_bytes();
    let mut aad = Vec::with_capacity(1 + 4 + record_bytes.len() + party_bytes.len());
    aad.push(version);
    aad.extend_from_slice(&(record_bytes.len() as u32).to_be_bytes());
    aad.extend_from_slice(record_bytes);
    aad.extend_from_slice(party_bytes);
    aad
}

/// Generate a random 12-byte nonce from the OS RNG.
fn generate_nonce() -> Result<[u8; AES_GCM_NONCE_LENGTH], CryptoError> {
    let mut nonce = [0u8; AES_GCM_NONCE_LENGTH];
    getrandom::getrandom(&mut nonce)
        .map_err(|e| CryptoError::EncryptionFailed(format!("nonce generation failed: {}", e)))?;
    Ok(nonce)
}

/// Immutable encrypted form of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    version: u8,
    #[serde(with = "crate::base64url::fixed")]
    nonce: [u8; AES_GCM_NONCE_LENGTH],
    #[serde(with = "crate::base64url::bytes")]
    ciphertext: Vec<u8>,
    #[serde(with = "crate::base64url::fixed")]
    tag: [u8; AES_GCM_TAG_LENGTH],
}

impl Envelope {
    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn nonce(&self) -> &[u8; AES_GCM_NONCE_LENGTH] {
        &self.nonce
    }

    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    pub fn tag(&self) -> &[u8; AES_GCM_TAG_LENGTH] {
        &self.tag
    }
}

/// Seals and opens envelopes with keys from a [`KeyProvider`].
///
/// Stateless apart from the provider; safe to share across threads.
pub struct EnvelopeCodec<K> {
    keys: K,
}

impl<K: KeyProvider> EnvelopeCodec<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    pub fn key_provider(&self) -> &K {
        &self.keys
    }

    /// Encrypt `plaintext` under a fresh random nonce, binding `context` into the tag.
    pub fn seal(
        &self,
        plaintext: &[u8],
        context: &RecordContext,
    ) -> Result<Envelope, CryptoError> {
        if plaintext.len() > MAX_PLAINTEXT_LENGTH {
            return Err(CryptoError::PayloadTooLarge {
                max: MAX_PLAINTEXT_LENGTH,
                got: plaintext.len(),
            });
        }

        let key = self.keys.current_key()?;
        let cipher = Aes256Gcm::new(key.as_bytes().into());
        let nonce = generate_nonce()?;
        let aad = build_aad(CURRENT_VERSION, context);

        let mut buffer = plaintext.to_vec();
        let tag = match cipher.encrypt_in_place_detached(
            Nonce::from_slice(&nonce),
            &aad,
            &mut buffer,
        ) {
            Ok(tag) => tag,
            Err(e) => {
                buffer.zeroize();
                return Err(CryptoError::EncryptionFailed(e.to_string()));
            }
        };

        let mut tag_bytes = [0u8; AES_GCM_TAG_LENGTH];
        tag_bytes.copy_from_slice(&tag);
        Ok(Envelope {
            version: CURRENT_VERSION,
            nonce,
            ciphertext: buffer,
            tag: tag_bytes,
        })
    }

    /// Verify and decrypt `envelope` under the caller-asserted `context`.
    ///
    /// The tag is checked over the full ciphertext before any plaintext is produced.
    /// Every authentication failure maps to the same detail-free error.
    pub fn open(
        &self,
        envelope: &Envelope,
        context: &RecordContext,
    ) -> Result<Vec<u8>, CryptoError> {
        if !SUPPORTED_VERSIONS.contains(&envelope.version) {
            return Err(CryptoError::UnsupportedVersion(envelope.version));
        }

        let key = self.keys.current_key()?;
        let cipher = Aes256Gcm::new(key.as_bytes().into());
        let aad = build_aad(envelope.version, context);

        let mut buffer = envelope.ciphertext.clone();
        match cipher.decrypt_in_place_detached(
            Nonce::from_slice(&envelope.nonce),
            &aad,
            &mut buffer,
            Tag::from_slice(&envelope.tag),
        ) {
            Ok(()) => Ok(buffer),
            Err(_) => {
                buffer.zeroize();
                Err(CryptoError::AuthenticationFailed)
            }
        }
    }
}
