use std::collections::HashSet;

use crate::service;

#[test]
fn concurrent_seal_and_reveal_across_threads() {
    let service = service();
    let threads = 8;
    let per_thread = 50;

    let ids: Vec<(String, Vec<u8>)> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let service = &service;
                s.spawn(move || {
                    (0..per_thread)
                        .map(|i| {
                            let payload = format!("thread-{t}-item-{i}").into_bytes();
                            let record = service.seal(&format!("party-{t}"), &payload).unwrap();
                            // Visible immediately after seal returns
                            assert_eq!(service.reveal(record.id()).unwrap(), payload);
                            (record.id().to_string(), payload)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(ids.len(), threads * per_thread);
    assert_eq!(service.store().len(), threads * per_thread);

    let unique: HashSet<&str> = ids.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(unique.len(), ids.len());

    for (id, payload) in &ids {
        assert_eq!(&service.reveal(id).unwrap(), payload);
    }
}

#[test]
fn readers_and_evictors_race_cleanly() {
    let service = service();
    let records: Vec<_> = (0..32)
        .map(|i| service.seal("alice", format!("payload-{i}").as_bytes()).unwrap())
        .collect();

    std::thread::scope(|s| {
        for record in &records {
            let service = &service;
            s.spawn(move || {
                // Either the record is still readable or it was evicted; never anything else
                match service.reveal(record.id()) {
                    Ok(plaintext) => assert!(plaintext.starts_with(b"payload-")),
                    Err(err) => assert_eq!(err.kind(), txvault::ErrorKind::NotFound),
                }
            });
            s.spawn(move || {
                service.evict(record.id());
            });
        }
    });

    assert!(service.store().is_empty());
}
