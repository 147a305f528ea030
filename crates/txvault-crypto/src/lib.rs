pub mod base64url;
pub mod envelope;
pub mod error;
pub mod key;
pub mod types;

pub use base64url::{base64url_decode, base64url_encode};
pub use envelope::{Envelope, EnvelopeCodec};
pub use error::CryptoError;
pub use key::{DerivedKeyProvider, KeyProvider, MasterSecret, SymmetricKey};
pub use types::{
    RecordContext, AES_GCM_NONCE_LENGTH, AES_GCM_TAG_LENGTH, AES_KEY_LENGTH, CURRENT_VERSION,
    MAX_PLAINTEXT_LENGTH, SUPPORTED_VERSIONS,
};
