use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Master secret missing or malformed. Fatal: no envelope can be sealed or opened.
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Payload too large: maximum {max} bytes, got {got}")]
    PayloadTooLarge { max: usize, got: usize },

    #[error("Unsupported envelope version: {0}")]
    UnsupportedVersion(u8),

    /// Tampered ciphertext, wrong key, or mismatched context. Deliberately carries no detail.
    #[error("Authentication failed")]
    AuthenticationFailed,
}
