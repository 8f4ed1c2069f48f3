use std::cell::Cell;
use std::sync::Arc;

use proptest::prelude::*;

use lc_crypto_key::error::ErrorKind;
use lc_crypto_key::key::SecureKey;

const BYTES: [u8; 8] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];

#[test]
fn test_default_is_null() {
    let key = SecureKey::default();
    assert!(key.is_null());
    assert_eq!(key.len(), 0);
    assert_eq!(key.to_string(), "");
    assert_eq!(key, SecureKey::new());
}

#[test]
fn test_display_hex() {
    let key = SecureKey::from(&BYTES);
    assert_eq!(key.to_string(), "0001020304050607");

    let key = SecureKey::from(&[0xdeu8, 0xad, 0xbe, 0xef]);
    assert_eq!(format!("{key}"), "deadbeef");
}

#[test]
fn test_from_hex() {
    let key = SecureKey::from_hex("00010203040506070809AaBbCcDdEeFf").unwrap();
    assert_eq!(key.len(), 16);
    assert_eq!(key.to_string(), "00010203040506070809aabbccddeeff");

    assert!(SecureKey::from_hex("").unwrap().is_null());

    assert_eq!(
        SecureKey::from_hex("abc").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
    assert_eq!(
        SecureKey::from_hex("zz").unwrap_err().kind(),
        ErrorKind::InvalidInput
    );
}

#[test]
fn test_set_to_empty_is_null() {
    let key = SecureKey::from(&BYTES);
    key.set(&[]);
    assert!(key.is_null());
    assert_eq!(key.len(), 0);
    assert!(key.view().is_empty());
    assert_eq!(key, SecureKey::new());
}

#[test]
fn test_clear() {
    let key = SecureKey::from(&BYTES);
    let copy = key.clone();
    key.clear();
    assert!(key.is_null());
    assert_eq!(copy.len(), BYTES.len());

    key.clear();
    assert!(key.is_null());
}

#[test]
fn test_equality() {
    let a = SecureKey::from(&BYTES);
    let b = SecureKey::from(&BYTES);
    let c = SecureKey::from(&[0u8, 1, 2, 3, 4, 5, 6, 8]);
    let short = SecureKey::from(&BYTES[..7]);
    let null = SecureKey::new();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, short);
    assert_ne!(a, null);
    assert_ne!(null, a);
    assert_eq!(null, SecureKey::new());

    assert!(a == BYTES[..]);
    assert!(a != BYTES[..7]);
    assert!(null == [0u8; 0][..]);
}

#[test]
fn test_assign_shares() {
    let a = SecureKey::from(&BYTES);
    let b = SecureKey::from(&[0xffu8; 3]);
    b.assign(&a);
    assert_eq!(a, b);
    assert_eq!(a.len(), BYTES.len());

    // a later set on one side does not leak to the other
    a.set(&[1]);
    assert_eq!(&*b.view(), &BYTES);
}

#[test]
fn test_replace_from_moves() {
    let a = SecureKey::from(&[0xffu8; 3]);
    let b = SecureKey::from(&BYTES);
    a.replace_from(&b);
    assert!(b.is_null());
    assert_eq!(&*a.view(), &BYTES);
}

#[test]
fn test_swap() {
    let a = SecureKey::from(&BYTES);
    let b = SecureKey::new();
    a.swap(&b);
    assert!(a.is_null());
    assert_eq!(&*b.view(), &BYTES);
}

#[test]
fn test_view_survives_drop() {
    let key = SecureKey::from(&BYTES);
    let view = key.view();
    drop(key);
    assert_eq!(&*view, &BYTES);
}

thread_local! {
    static WIPES: Cell<usize> = const { Cell::new(0) };
}

/// Counts key buffer wipes reported on the current thread.
struct WipeCounter;

impl log::Log for WipeCounter {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() == log::Level::Trace
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) && record.args().to_string().starts_with("wiping") {
            WIPES.with(|w| w.set(w.get() + 1));
        }
    }

    fn flush(&self) {}
}

static WIPE_COUNTER: WipeCounter = WipeCounter;

fn wipes() -> usize {
    WIPES.with(Cell::get)
}

#[test]
fn test_wiped_only_when_last_holder_releases() {
    let _ = log::set_logger(&WIPE_COUNTER);
    log::set_max_level(log::LevelFilter::Trace);

    let key = SecureKey::from(&BYTES);
    let copy = key.clone();
    key.clear();
    assert_eq!(wipes(), 0, "clearing one of two clones");

    let view = copy.view();
    copy.set(&[0x11; 16]);
    assert_eq!(wipes(), 0, "set while a view is alive");

    drop(view);
    assert_eq!(wipes(), 1, "last view dropped");

    let moved = copy.take();
    assert!(copy.is_null());
    assert_eq!(wipes(), 1, "take does not wipe");
    drop(moved);
    assert_eq!(wipes(), 2, "moved-to key dropped");

    drop(key);
    drop(copy);
    assert_eq!(wipes(), 2, "null keys hold nothing to wipe");
}

#[test]
fn test_concurrent_readers_and_writers() {
    let key = SecureKey::from(&BYTES);
    let other = [0xaau8; 16];

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                for _ in 0..1000 {
                    // a reader sees one of the two values in full, never a mix
                    let view = key.view();
                    assert!(*view == BYTES[..] || *view == other[..]);
                    let _ = key.to_string();
                }
            });
        }
        for _ in 0..2 {
            s.spawn(|| {
                for i in 0..1000 {
                    if i % 2 == 0 {
                        key.set(&other);
                    } else {
                        key.set(&BYTES);
                    }
                }
            });
        }
    });

    let view = key.view();
    assert!(*view == BYTES[..] || *view == other[..]);
}

#[test]
fn test_concurrent_swaps_do_not_deadlock() {
    let a = Arc::new(SecureKey::from(&[1u8; 4]));
    let b = Arc::new(SecureKey::from(&[2u8; 4]));

    std::thread::scope(|s| {
        for t in 0..4 {
            let (a, b) = (Arc::clone(&a), Arc::clone(&b));
            s.spawn(move || {
                for _ in 0..1000 {
                    if t % 2 == 0 {
                        a.swap(&b);
                    } else {
                        b.swap(&a);
                    }
                    let _ = *a == *b;
                }
            });
        }
    });

    // 4000 swaps in total: back where we started
    assert_eq!(&*a.view(), &[1u8; 4]);
    assert_eq!(&*b.view(), &[2u8; 4]);
}

proptest! {
    #[test]
    fn prop_roundtrip(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let key = SecureKey::from_slice(&bytes);
        prop_assert_eq!(key.len(), bytes.len());
        prop_assert_eq!(key.is_null(), bytes.is_empty());
        let view = key.view();
        prop_assert_eq!(&*view, &bytes[..]);

        let reparsed = SecureKey::from_hex(&key.to_string()).unwrap();
        prop_assert_eq!(reparsed, key);
    }

    #[test]
    fn prop_eq_matches_bytes(
        a in proptest::collection::vec(any::<u8>(), 0..16),
        b in proptest::collection::vec(any::<u8>(), 0..16),
    ) {
        let ka = SecureKey::from_slice(&a);
        let kb = SecureKey::from_slice(&b);
        prop_assert_eq!(ka == kb, a == b);
    }

    #[test]
    fn prop_clone_is_independent_handle(
        a in proptest::collection::vec(any::<u8>(), 1..32),
        b in proptest::collection::vec(any::<u8>(), 0..32),
    ) {
        let key = SecureKey::from_slice(&a);
        let copy = key.clone();
        key.set(&b);
        let (old, new) = (copy.view(), key.view());
        prop_assert_eq!(&*old, &a[..]);
        prop_assert_eq!(&*new, &b[..]);
    }
}
