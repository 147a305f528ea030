//! Process configuration, read once at startup.
//!
//! # Environment Variables
//!
//! - `TXVAULT_MASTER_SECRET`: master secret, 64 hex chars (required)
//! - `TXVAULT_RECORD_TTL_SECS`: record lifetime in seconds (default: records never expire)

use std::fmt;
use std::time::Duration;

use txvault_crypto::{CryptoError, MasterSecret};
use zeroize::Zeroizing;

use crate::error::{Result, TxError};

pub const MASTER_SECRET_VAR: &str = "TXVAULT_MASTER_SECRET";
pub const RECORD_TTL_VAR: &str = "TXVAULT_RECORD_TTL_SECS";

#[derive(Clone)]
pub struct VaultConfig {
    master_secret: MasterSecret,
    record_ttl: Option<Duration>,
}

impl VaultConfig {
    pub fn new(master_secret: MasterSecret) -> Self {
        Self {
            master_secret,
            record_ttl: None,
        }
    }

    pub fn with_record_ttl(mut self, ttl: Duration) -> Self {
        self.record_ttl = Some(ttl);
        self
    }

    pub fn master_secret(&self) -> &MasterSecret {
        &self.master_secret
    }

    pub fn record_ttl(&self) -> Option<Duration> {
        self.record_ttl
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// A missing or malformed master secret is `KeyUnavailable`; a malformed
    /// TTL is `InvalidConfig`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_secret = Zeroizing::new(lookup(MASTER_SECRET_VAR).ok_or_else(|| {
            CryptoError::KeyUnavailable(format!("{} is not set", MASTER_SECRET_VAR))
        })?);
        let master_secret = MasterSecret::from_hex(&raw_secret)?;

        let record_ttl = match lookup(RECORD_TTL_VAR) {
            None => None,
            Some(raw) => Some(parse_ttl(&raw)?),
        };

        Ok(Self {
            master_secret,
            record_ttl,
        })
    }
}

fn parse_ttl(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(TxError::InvalidConfig(format!(
            "{} must be a positive integer, got {:?}",
            RECORD_TTL_VAR, raw
        ))),
    }
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("master_secret", &"<redacted>")
            .field("record_ttl", &self.record_ttl)
            .finish()
    }
}
