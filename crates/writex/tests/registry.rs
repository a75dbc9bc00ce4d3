//! Registry behaviour against the SQLite backend.

use std::sync::Arc;

use writex::core::AddressDeriver;
use writex::store::{SqliteStore, WriterStore};
use writex::{DerivationSecret, Registry, WritexError};

fn registry(store: SqliteStore) -> Registry<SqliteStore> {
    let secret = DerivationSecret::new("writex-test-secret").unwrap();
    Registry::new(store, AddressDeriver::new(secret))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_yield_one_record() {
    let registry = Arc::new(registry(SqliteStore::open_memory().unwrap()));

    let mut handles = Vec::new();
    for _ in 0..16 {
        let registry = Arc::clone(&registry);
        handles.push(tokio::spawn(async move { registry.create("pub123").await }));
    }

    let mut records = Vec::new();
    for handle in handles {
        records.push(handle.await.unwrap().unwrap());
    }

    let first = &records[0];
    assert!(records.iter().all(|r| r == first));
    assert_eq!(registry.store().count_writers().await.unwrap(), 1);
}

#[tokio::test]
async fn registrations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    let created = registry(SqliteStore::open(&path).unwrap())
        .create("pub123")
        .await
        .unwrap();

    let reopened = registry(SqliteStore::open(&path).unwrap());
    let again = reopened.create("pub123").await.unwrap();
    assert_eq!(again, created);
    assert_eq!(reopened.fetch_address("pub123").await.unwrap(), created.address);
    assert_eq!(reopened.count().await.unwrap(), 1);
}

#[tokio::test]
async fn a_different_secret_does_not_rewrite_stored_addresses() {
    let store = SqliteStore::open_memory().unwrap();
    let created = registry(store.clone()).create("pub123").await.unwrap();

    let other = Registry::new(
        store,
        AddressDeriver::new(DerivationSecret::new("rotated").unwrap()),
    );
    let fetched = other.create("pub123").await.unwrap();
    assert_eq!(fetched.address, created.address);
    assert_ne!(other.derive("pub123").unwrap(), created.address);
}

#[tokio::test]
async fn unknown_key_is_not_found() {
    let registry = registry(SqliteStore::open_memory().unwrap());
    assert!(matches!(
        registry.fetch_address("nobody").await,
        Err(WritexError::NotFound(_))
    ));
}
