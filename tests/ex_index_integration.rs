//! ex_data index allocation against the linked OpenSSL library
//!
//! These tests race many threads on process-wide slots and check that every
//! caller observes the same allocated index.

use std::sync::Barrier;
use std::thread;

use sslutil::tls::{ensure_index, ExDataKind, ExIndex, ExIndexSlot, TlsError};

static CTX_INDEX: ExIndexSlot = ExIndexSlot::ssl_context();
static RSA_INDEX: ExIndexSlot = ExIndexSlot::rsa();
static SESSION_INDEX: ExIndexSlot = ExIndexSlot::ssl_session_string();

fn race(slot: &'static ExIndexSlot, threads: usize) -> Vec<ExIndex> {
    let barrier = Barrier::new(threads);
    thread::scope(|s| {
        let handles: Vec<_> = (0..threads)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    ensure_index(slot.kind(), slot).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_concurrent_allocation_per_kind() {
    for slot in [&CTX_INDEX, &RSA_INDEX, &SESSION_INDEX] {
        let indexes = race(slot, 100);
        let first = indexes[0];

        assert!(first.as_raw() >= 0, "{} index not allocated", slot.kind());
        assert!(indexes.iter().all(|&i| i == first));
        assert_eq!(slot.get(), Some(first));
    }
}

#[test]
fn test_slots_of_same_kind_are_distinct() {
    static FIRST: ExIndexSlot = ExIndexSlot::ssl_session_string();
    static SECOND: ExIndexSlot = ExIndexSlot::ssl_session_string();

    let first = FIRST.ensure().unwrap();
    let second = SECOND.ensure().unwrap();
    assert_ne!(first, second);

    // allocation is sticky
    assert_eq!(FIRST.ensure().unwrap(), first);
    assert_eq!(SECOND.ensure().unwrap(), second);
}

#[test]
fn test_kind_mismatch_is_rejected() {
    static SLOT: ExIndexSlot = ExIndexSlot::rsa();

    let result = ensure_index(ExDataKind::Context, &SLOT);
    assert!(matches!(
        result,
        Err(TlsError::ExIndexKindMismatch {
            expected: ExDataKind::Context,
            found: ExDataKind::AsymmetricKey,
        })
    ));
    assert!(SLOT.get().is_none());
}
