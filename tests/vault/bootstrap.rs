use std::time::Duration;

use chrono::Utc;
use txvault::config::{MASTER_SECRET_VAR, RECORD_TTL_VAR};
use txvault::{ErrorKind, MasterSecret, TransactionService, VaultConfig};

fn lookup(secret: Option<&str>, ttl: Option<&str>) -> impl Fn(&str) -> Option<String> {
    let secret = secret.map(str::to_string);
    let ttl = ttl.map(str::to_string);
    move |name: &str| match name {
        MASTER_SECRET_VAR => secret.clone(),
        RECORD_TTL_VAR => ttl.clone(),
        _ => None,
    }
}

#[test]
fn service_from_config_round_trips() {
    let secret = hex::encode([0x17u8; 32]);
    let config = VaultConfig::from_lookup(lookup(Some(&secret), None)).unwrap();
    let service = TransactionService::from_config(&config).unwrap();

    let record = service.seal("alice", b"configured").unwrap();
    assert_eq!(service.reveal(record.id()).unwrap(), b"configured");
}

#[test]
fn same_secret_opens_records_after_restart() {
    let secret = hex::encode([0x29u8; 32]);
    let config = VaultConfig::from_lookup(lookup(Some(&secret), None)).unwrap();

    let first = TransactionService::from_config(&config).unwrap();
    let record = first.seal("alice", b"survives restart").unwrap();

    let second = TransactionService::from_config(&config).unwrap();
    let plaintext = second
        .codec()
        .open(record.envelope(), &record.context())
        .unwrap();
    assert_eq!(plaintext, b"survives restart");
}

#[test]
fn missing_secret_blocks_startup() {
    let err = VaultConfig::from_lookup(lookup(None, None)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyUnavailable);
}

#[test]
fn malformed_secret_blocks_startup() {
    let err = VaultConfig::from_lookup(lookup(Some("deadbeef"), None)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::KeyUnavailable);
}

#[test]
fn ttl_config_drives_expiry() {
    let secret = hex::encode([0x31u8; 32]);
    let config = VaultConfig::from_lookup(lookup(Some(&secret), Some("60"))).unwrap();
    assert_eq!(config.record_ttl(), Some(Duration::from_secs(60)));

    let service = TransactionService::from_config(&config).unwrap();
    let record = service.seal("alice", b"short lived").unwrap();

    // Nothing has expired yet
    assert_eq!(service.purge_expired(), 0);
    assert!(service.reveal(record.id()).is_ok());

    let later = Utc::now() + chrono::Duration::seconds(61);
    assert_eq!(service.store().purge_expired(later), 1);
    assert_eq!(service.reveal(record.id()).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn explicit_config_builder() {
    let config = VaultConfig::new(MasterSecret::generate().unwrap())
        .with_record_ttl(Duration::from_secs(5));
    let service = TransactionService::from_config(&config).unwrap();
    assert_eq!(service.store().ttl(), Some(Duration::from_secs(5)));
}
