//! Master secret handling and envelope key derivation.
//!
//! envelope_key = HKDF-SHA256(ikm = master secret, salt = KEY_SALT, info = KEY_INFO)
//!
//! The envelope key is re-derived for every seal/open and zeroized when the
//! caller drops it. Only the master secret lives for the process lifetime.

use std::fmt;
use std::sync::Arc;

use hkdf::Hkdf;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;
use crate::types::AES_KEY_LENGTH;

const KEY_SALT: &[u8] = b"txvault:key-salt:v1";
const KEY_INFO: &[u8] = b"txvault:envelope-key:v1";

/// 256-bit symmetric key used for a single seal/open call.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; AES_KEY_LENGTH]);

impl SymmetricKey {
    pub fn from_bytes(bytes: [u8; AES_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; AES_KEY_LENGTH] {
        &self.0
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Process-wide master secret (exactly 32 bytes).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterSecret([u8; AES_KEY_LENGTH]);

impl MasterSecret {
    /// Accept raw secret bytes.
    ///
    /// Fails with `KeyUnavailable` unless the input is exactly 32 bytes and not all zero.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != AES_KEY_LENGTH {
            return Err(CryptoError::KeyUnavailable(format!(
                "master secret must be {} bytes, got {}",
                AES_KEY_LENGTH,
                bytes.len()
            )));
        }
        if bytes.iter().all(|b| *b == 0) {
            return Err(CryptoError::KeyUnavailable(
                "master secret must not be all zero".into(),
            ));
        }
        let mut secret = [0u8; AES_KEY_LENGTH];
        secret.copy_from_slice(bytes);
        Ok(Self(secret))
    }

    /// Parse a hex-encoded secret (64 hex characters).
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode(encoded.trim())
                .map_err(|_| CryptoError::KeyUnavailable("master secret is not valid hex".into()))?,
        );
        Self::from_slice(&bytes)
    }

    /// Generate a fresh random master secret.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut secret = [0u8; AES_KEY_LENGTH];
        getrandom::getrandom(&mut secret)
            .map_err(|e| CryptoError::KeyUnavailable(format!("RNG failed: {}", e)))?;
        Ok(Self(secret))
    }
}

impl fmt::Debug for MasterSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterSecret(<redacted>)")
    }
}

/// Source of the active envelope key.
pub trait KeyProvider: Send + Sync {
    /// Return the active key. Repeated calls yield the same key for the life of the provider.
    fn current_key(&self) -> Result<SymmetricKey, CryptoError>;
}

impl<K: KeyProvider + ?Sized> KeyProvider for Arc<K> {
    fn current_key(&self) -> Result<SymmetricKey, CryptoError> {
        (**self).current_key()
    }
}

/// Derives the envelope key from a master secret with HKDF-SHA256.
pub struct DerivedKeyProvider {
    master: MasterSecret,
}

impl DerivedKeyProvider {
    /// Build a provider and run one trial derivation so failures surface at startup.
    pub fn new(master: MasterSecret) -> Result<Self, CryptoError> {
        let provider = Self { master };
        provider.current_key()?;
        Ok(provider)
    }
}

impl KeyProvider for DerivedKeyProvider {
    fn current_key(&self) -> Result<SymmetricKey, CryptoError> {
        let hk = Hkdf::<Sha256>::new(Some(KEY_SALT), &self.master.0);
        let mut okm = [0u8; AES_KEY_LENGTH];
        hk.expand(KEY_INFO, &mut okm)
            .map_err(|e| CryptoError::KeyUnavailable(format!("HKDF expand failed: {}", e)))?;
        let key = SymmetricKey(okm);
        okm.zeroize();
        Ok(key)
    }
}

impl fmt::Debug for DerivedKeyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKeyProvider").finish_non_exhaustive()
    }
}
