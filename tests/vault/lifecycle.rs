use serde_json::json;
use txvault::{ErrorKind, MAX_PLAINTEXT_LENGTH};

use crate::service;

#[test]
fn alice_seals_fetches_and_reveals() {
    let service = service();
    let record = service.seal_json("alice", &json!({"amount": 100})).unwrap();

    assert!(!record.id().is_empty());
    assert_eq!(record.party_id(), "alice");
    assert!(!record.envelope().nonce().is_empty());
    assert!(!record.envelope().ciphertext().is_empty());
    assert!(!record.envelope().tag().is_empty());

    let fetched = service.fetch_encrypted(record.id()).unwrap();
    assert_eq!(fetched, record);

    assert_eq!(service.reveal(record.id()).unwrap(), br#"{"amount":100}"#);
}

#[test]
fn encrypted_form_never_contains_plaintext() {
    let service = service();
    let record = service.seal("alice", b"card=4111111111111111").unwrap();
    let exposed = serde_json::to_string(&service.fetch_encrypted(record.id()).unwrap()).unwrap();
    assert!(!exposed.contains("4111111111111111"));
    assert!(exposed.contains("\"partyId\":\"alice\""));
}

#[test]
fn reads_are_idempotent_until_eviction() {
    let service = service();
    let record = service.seal("bob", b"repeatable").unwrap();

    let first_fetch = service.fetch_encrypted(record.id()).unwrap();
    let first_reveal = service.reveal(record.id()).unwrap();
    for _ in 0..5 {
        assert_eq!(service.fetch_encrypted(record.id()).unwrap(), first_fetch);
        assert_eq!(service.reveal(record.id()).unwrap(), first_reveal);
    }

    assert!(service.evict(record.id()));
    assert_eq!(
        service.fetch_encrypted(record.id()).unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(service.reveal(record.id()).unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn unknown_id_is_not_found() {
    let service = service();
    assert_eq!(
        service.fetch_encrypted("nonexistent").unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(service.reveal("nonexistent").unwrap_err().kind(), ErrorKind::NotFound);
}

#[test]
fn each_seal_gets_its_own_record() {
    let service = service();
    let a = service.seal("alice", b"same payload").unwrap();
    let b = service.seal("alice", b"same payload").unwrap();
    assert_ne!(a.id(), b.id());
    assert_ne!(a.envelope().nonce(), b.envelope().nonce());
    assert_eq!(service.store().len(), 2);
}

#[test]
fn payload_size_boundary() {
    let service = service();

    let at_limit = vec![0xa5u8; MAX_PLAINTEXT_LENGTH];
    let record = service.seal("alice", &at_limit).unwrap();
    assert_eq!(service.reveal(record.id()).unwrap().len(), MAX_PLAINTEXT_LENGTH);

    let over_limit = vec![0xa5u8; MAX_PLAINTEXT_LENGTH + 1];
    let err = service.seal("alice", &over_limit).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PayloadTooLarge);
}

#[test]
fn records_from_another_vault_do_not_open() {
    let ours = service();
    let theirs = service();
    let record = theirs.seal("alice", b"foreign").unwrap();

    let envelope = record.envelope();
    let context = record.context();
    let err = ours.codec().open(envelope, &context).unwrap_err();
    assert_eq!(err.to_string(), "Authentication failed");
}
