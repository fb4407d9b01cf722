//! Key store lifecycle and its use as a key provider

use chrono::{Duration, Utc};
use std::sync::{Arc, OnceLock};
use std::thread;
use tokenstamp_jwt::key::{create_token_with_key, validate_token_with_key};
use tokenstamp_jwt::{FailureReason, Key, KeyId, KeyKind, KeyProvider, ValidationOptions};
use tokenstamp_key::{KeyError, MemoryKeyStore};

/// One store with an RSA key, shared by the RSA tests to keep generation to
/// a minimum.
fn rsa_store() -> &'static (MemoryKeyStore, KeyId) {
    static STORE: OnceLock<(MemoryKeyStore, KeyId)> = OnceLock::new();
    STORE.get_or_init(|| {
        let store = MemoryKeyStore::new();
        let id = store.create_asymmetric("signing").unwrap();
        (store, id)
    })
}

fn round_trip(store: &MemoryKeyStore, id: KeyId) -> tokenstamp_jwt::ValidationResult {
    let now = Utc::now();
    let token = create_token_with_key(store, id, "alice", "admin", None, now).unwrap();
    validate_token_with_key(store, id, token.as_str(), now, &ValidationOptions::strict())
}

#[test]
fn ids_are_monotonic() {
    let store = MemoryKeyStore::new();
    let a = store.create_symmetric("a");
    let b = store.create_symmetric("b");
    assert!(b > a);
    assert_eq!(store.len(), 2);
}

#[test]
fn symmetric_key_round_trip() {
    let store = MemoryKeyStore::new();
    let id = store.create_symmetric("api");

    let key = store.get(id).unwrap();
    assert_eq!(key.kind, KeyKind::Symmetric);
    assert_eq!(key.secret_material().map(<[u8]>::len), Some(32));

    assert!(round_trip(&store, id).valid);
}

#[test]
fn asymmetric_key_round_trip() {
    let (store, id) = rsa_store();

    let key = store.get(*id).unwrap();
    assert_eq!(key.kind, KeyKind::Asymmetric);
    assert!(key.public_material().is_some());

    let result = round_trip(store, *id);
    assert!(result.valid);
    assert_eq!(result.subject.as_deref(), Some("alice"));
}

#[test]
fn deactivated_keys_are_hidden_from_lookup() {
    let store = MemoryKeyStore::new();
    let id = store.create_symmetric("api");
    let now = Utc::now();
    let token = create_token_with_key(&store, id, "alice", "", None, now).unwrap();

    store.deactivate(id).unwrap();
    assert!(store.lookup(id).is_none());
    assert!(!store.get(id).unwrap().active);

    let result =
        validate_token_with_key(&store, id, token.as_str(), now, &ValidationOptions::strict());
    assert_eq!(result.failure_reason, Some(FailureReason::KeyUnavailable));

    let err = create_token_with_key(&store, id, "alice", "", None, now).unwrap_err();
    assert_eq!(err.failure_reason(), FailureReason::KeyUnavailable);

    store.activate(id).unwrap();
    let result =
        validate_token_with_key(&store, id, token.as_str(), now, &ValidationOptions::strict());
    assert!(result.valid);
}

#[test]
fn unknown_ids_are_not_found() {
    let store = MemoryKeyStore::new();
    let missing = KeyId(42);

    assert_eq!(store.deactivate(missing), Err(KeyError::NotFound { id: missing }));
    assert_eq!(store.activate(missing), Err(KeyError::NotFound { id: missing }));
    assert_eq!(store.rotate(missing), Err(KeyError::NotFound { id: missing }));
    assert!(store.get(missing).is_none());
}

#[test]
fn rotation_retires_the_old_key() {
    let store = MemoryKeyStore::new();
    let old = store.create_symmetric("api");
    let now = Utc::now();
    let old_token = create_token_with_key(&store, old, "alice", "", None, now).unwrap();

    let new = store.rotate(old).unwrap();
    assert_ne!(new, old);

    let old_key = store.get(old).unwrap();
    let new_key = store.get(new).unwrap();
    assert!(!old_key.active);
    assert!(new_key.active);
    assert_eq!(new_key.name, "api");
    assert_eq!(new_key.kind, KeyKind::Symmetric);
    assert_ne!(new_key.secret_material(), old_key.secret_material());

    let options = ValidationOptions::strict();
    let result = validate_token_with_key(&store, old, old_token.as_str(), now, &options);
    assert_eq!(result.failure_reason, Some(FailureReason::KeyUnavailable));

    let result = validate_token_with_key(&store, new, old_token.as_str(), now, &options);
    assert_eq!(result.failure_reason, Some(FailureReason::SignatureInvalid));

    assert!(round_trip(&store, new).valid);
}

#[test]
fn inserted_keys_do_not_collide_with_allocated_ids() {
    let store = MemoryKeyStore::new();
    let external = Key::symmetric(KeyId(10), "imported", b"s3cr3t".to_vec(), Utc::now());

    assert!(store.insert(external).is_none());
    let next = store.create_symmetric("fresh");
    assert!(next > KeyId(10));

    let ids: Vec<KeyId> = store.list().iter().map(|key| key.id).collect();
    assert_eq!(ids, vec![KeyId(10), next]);

    let now = Utc::now() - Duration::minutes(1);
    let token = create_token_with_key(&store, KeyId(10), "bob", "", None, now).unwrap();
    let options = ValidationOptions::strict();
    assert!(validate_token_with_key(&store, KeyId(10), token.as_str(), now, &options).valid);
}

#[test]
fn rsa_sizes_below_minimum_are_refused() {
    assert_eq!(
        MemoryKeyStore::with_rsa_bits(1024).unwrap_err(),
        KeyError::InvalidKeySize {
            minimum: 2048,
            actual: 1024
        }
    );
}

#[test]
fn concurrent_creation_yields_distinct_ids() {
    let store = Arc::new(MemoryKeyStore::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.create_symmetric(format!("worker-{i}")))
        })
        .collect();

    let mut ids: Vec<KeyId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(store.len(), 8);
}

#[test]
fn retired_keys_cannot_be_rotated_again() {
    let store = MemoryKeyStore::new();
    let old = store.create_symmetric("api");
    store.rotate(old).unwrap();

    assert_eq!(store.rotate(old), Err(KeyError::Inactive { id: old }));
    assert_eq!(store.len(), 2);
}

#[test]
fn concurrent_rotations_of_one_key_mint_a_single_successor() {
    let store = Arc::new(MemoryKeyStore::new());
    let old = store.create_symmetric("api");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.rotate(old))
        })
        .collect();
    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let successors: Vec<KeyId> = outcomes.iter().filter_map(|r| r.clone().ok()).collect();
    assert_eq!(successors.len(), 1);
    assert!(
        outcomes
            .iter()
            .filter(|r| r.is_err())
            .all(|r| *r == Err(KeyError::Inactive { id: old }))
    );

    let active: Vec<KeyId> = store
        .list()
        .into_iter()
        .filter(|key| key.active)
        .map(|key| key.id)
        .collect();
    assert_eq!(active, successors);
}
