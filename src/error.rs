use thiserror::Error;
use txvault_crypto::CryptoError;

pub type Result<T> = std::result::Result<T, TxError>;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An id collided with a stored record. Ids are generated, so this is an invariant violation.
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Record not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum TxError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for TxError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateId(id) => TxError::DuplicateId(id),
            StoreError::NotFound(id) => TxError::NotFound(id),
        }
    }
}

/// Flat error classification for callers that map failures to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    PayloadTooLarge,
    KeyUnavailable,
    EncryptionFailed,
    UnsupportedVersion,
    AuthenticationFailed,
    DuplicateId,
    NotFound,
    InvalidConfig,
}

impl ErrorKind {
    /// Fatal kinds signal misconfiguration or a broken invariant rather than a bad request.
    pub fn is_fatal(self) -> bool {
        matches!(
            self,
            ErrorKind::KeyUnavailable
                | ErrorKind::EncryptionFailed
                | ErrorKind::DuplicateId
                | ErrorKind::InvalidConfig
        )
    }
}

impl TxError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TxError::InvalidInput(_) | TxError::Json(_) => ErrorKind::InvalidInput,
            TxError::NotFound(_) => ErrorKind::NotFound,
            TxError::DuplicateId(_) => ErrorKind::DuplicateId,
            TxError::InvalidConfig(_) => ErrorKind::InvalidConfig,
            TxError::Crypto(err) => match err {
                CryptoError::KeyUnavailable(_) => ErrorKind::KeyUnavailable,
                CryptoError::EncryptionFailed(_) => ErrorKind::EncryptionFailed,
                CryptoError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
                CryptoError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
                CryptoError::AuthenticationFailed => ErrorKind::AuthenticationFailed,
            },
        }
    }
}
