//! Behaviour of the keychain facade against a fake provider.
//!
//! These tests drive the strict/permissive retry protocol end to end through
//! the public API, forcing provider answers where a real keychain would need
//! items written by another device.

use std::sync::Arc;

use keysafe_integration_tests::{FakeProvider, Mode, Op};
use keysafe_secrets::{
    Accessibility, Keychain, KeychainError, ProviderStatus, SecretKey, SecretStore,
    SecretStoreExt, StoreConfiguration, ValueError,
};
use serde::{Deserialize, Serialize};

const INTERACTION_NOT_ALLOWED: ProviderStatus = ProviderStatus(-25308);

fn token_key() -> SecretKey {
    SecretKey::new("ns.auth", "token")
}

fn local_store(provider: Arc<FakeProvider>) -> Keychain<Arc<FakeProvider>> {
    Keychain::new(provider, StoreConfiguration::default())
}

fn synced_store(provider: Arc<FakeProvider>) -> Keychain<Arc<FakeProvider>> {
    Keychain::new(
        provider,
        StoreConfiguration::new(Accessibility::AfterFirstUnlock, None, true),
    )
}

#[test]
fn test_set_creates_missing_item_then_get_returns_it() {
    let provider = Arc::new(FakeProvider::new());
    let store = local_store(provider.clone());

    store.set(&token_key(), b"abc").unwrap();
    assert_eq!(
        provider.calls(),
        vec![(Op::Update, Mode::Strict), (Op::Add, Mode::Strict)]
    );

    let value = store.get(&token_key()).unwrap().unwrap();
    assert_eq!(value.expose_secret(), b"abc");
}

#[test]
fn test_set_twice_keeps_last_value() {
    let provider = Arc::new(FakeProvider::new());
    let store = local_store(provider.clone());

    store.set(&token_key(), b"first").unwrap();
    store.set(&token_key(), b"second").unwrap();

    assert_eq!(store.get(&token_key()).unwrap().unwrap().expose_secret(), b"second");
    assert_eq!(provider.stored_items(), 1);
}

#[test]
fn test_get_never_written_is_absent() {
    let store = local_store(Arc::new(FakeProvider::new()));
    assert!(store.get(&token_key()).unwrap().is_none());
}

#[test]
fn test_delete_never_written_is_ok() {
    let provider = Arc::new(FakeProvider::new());
    let store = local_store(provider.clone());

    store.delete(&token_key()).unwrap();
    assert_eq!(
        provider.calls(),
        vec![(Op::Delete, Mode::Strict), (Op::Delete, Mode::Permissive)]
    );
}

#[test]
fn test_get_falls_back_when_strict_lookup_misses() {
    let provider = Arc::new(FakeProvider::new());
    let store = local_store(provider.clone());
    store.set(&token_key(), b"abc").unwrap();

    provider.force(Op::Fetch, Mode::Strict, ProviderStatus::ITEM_NOT_FOUND);
    provider.clear_calls();

    let value = store.get(&token_key()).unwrap().unwrap();
    assert_eq!(value.expose_secret(), b"abc");
    assert_eq!(
        provider.calls(),
        vec![(Op::Fetch, Mode::Strict), (Op::Fetch, Mode::Permissive)]
    );
}

#[test]
fn test_local_store_sees_item_written_with_sync() {
    let provider = Arc::new(FakeProvider::new());
    synced_store(provider.clone())
        .set(&token_key(), b"synced")
        .unwrap();

    let local = Keychain::new(
        provider.clone(),
        StoreConfiguration::new(Accessibility::AfterFirstUnlock, None, false),
    );
    assert_eq!(local.get(&token_key()).unwrap().unwrap().expose_secret(), b"synced");
    assert!(local.contains(&token_key()).unwrap());
}

#[test]
fn test_delete_permissive_only_item() {
    let provider = Arc::new(FakeProvider::new());
    synced_store(provider.clone())
        .set(&token_key(), b"synced")
        .unwrap();
    provider.clear_calls();

    let local = Keychain::new(
        provider.clone(),
        StoreConfiguration::new(Accessibility::AfterFirstUnlock, None, false),
    );
    local.delete(&token_key()).unwrap();

    assert_eq!(
        provider.calls(),
        vec![(Op::Delete, Mode::Strict), (Op::Delete, Mode::Permissive)]
    );
    assert_eq!(provider.stored_items(), 0);
}

#[test]
fn test_unexpected_status_skips_fallback_for_get() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Fetch, Mode::Strict, INTERACTION_NOT_ALLOWED);
    let store = local_store(provider.clone());

    assert_eq!(
        store.get(&token_key()),
        Err(KeychainError::Unexpected(-25308))
    );
    assert!(!provider.saw_permissive());
}

#[test]
fn test_unexpected_status_skips_fallback_for_set() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Update, Mode::Strict, INTERACTION_NOT_ALLOWED);
    let store = local_store(provider.clone());

    assert_eq!(
        store.set(&token_key(), b"abc"),
        Err(KeychainError::Unexpected(-25308))
    );
    assert_eq!(provider.calls(), vec![(Op::Update, Mode::Strict)]);
    assert_eq!(provider.stored_items(), 0);
}

#[test]
fn test_unexpected_status_skips_fallback_for_delete() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Delete, Mode::Strict, INTERACTION_NOT_ALLOWED);
    let store = local_store(provider.clone());

    assert_eq!(
        store.delete(&token_key()),
        Err(KeychainError::Unexpected(-25308))
    );
    assert!(!provider.saw_permissive());
}

#[test]
fn test_duplicate_from_add_is_reported() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Add, Mode::Strict, ProviderStatus::DUPLICATE_ITEM);
    let store = local_store(provider);

    assert_eq!(
        store.set(&token_key(), b"abc"),
        Err(KeychainError::DuplicateItem)
    );
}

#[test]
fn test_permissive_fetch_error_degrades_to_absent() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Fetch, Mode::Permissive, INTERACTION_NOT_ALLOWED);
    let store = local_store(provider);

    assert!(store.get(&token_key()).unwrap().is_none());
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Session {
    user_id: u64,
    scopes: Vec<String>,
}

#[test]
fn test_structured_value_roundtrip() {
    let store = local_store(Arc::new(FakeProvider::new()));
    let key = SecretKey::new("ns.auth", "session");
    let session = Session {
        user_id: 42,
        scopes: vec!["read".to_string(), "write".to_string()],
    };

    store.set_value(&key, &session).unwrap();
    let loaded: Session = store.get_value(&key).unwrap().unwrap();
    assert_eq!(loaded, session);
}

#[test]
fn test_structured_value_keeps_store_errors() {
    let provider = Arc::new(FakeProvider::new());
    provider.force(Op::Fetch, Mode::Strict, INTERACTION_NOT_ALLOWED);
    let store = local_store(provider);

    let result: Result<Option<Session>, ValueError> = store.get_value(&token_key());
    assert!(matches!(
        result,
        Err(ValueError::Store(KeychainError::Unexpected(-25308)))
    ));
}

#[test]
fn test_store_is_usable_as_trait_object() {
    let store: Box<dyn SecretStore> = Box::new(local_store(Arc::new(FakeProvider::new())));
    store.set_string(&token_key(), "abc").unwrap();
    assert_eq!(store.get_string(&token_key()).unwrap().as_deref(), Some("abc"));
}
