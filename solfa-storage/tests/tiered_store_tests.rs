use async_trait::async_trait;
use solfa_storage::{KeyValueStore, SqliteStore, StorageError, StorageResult, TieredStore};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A tier that fails every call, standing in for a quota-exhausted or
/// disabled engine.
struct BrokenStore {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl KeyValueStore for BrokenStore {
    async fn get(&self, _name: &str) -> StorageResult<Option<Vec<u8>>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::NoTierAvailable("engine disabled".to_string()))
    }

    async fn set(&self, _name: &str, _value: &[u8]) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::NoTierAvailable("engine disabled".to_string()))
    }

    async fn remove(&self, _name: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::NoTierAvailable("engine disabled".to_string()))
    }
}

fn broken(calls: &Arc<AtomicUsize>) -> Box<dyn KeyValueStore> {
    Box::new(BrokenStore {
        calls: Arc::clone(calls),
    })
}

#[tokio::test]
async fn first_tier_serves_when_healthy() {
    let fallback_calls = Arc::new(AtomicUsize::new(0));
    let store = TieredStore::new(vec![
        Box::new(SqliteStore::open_in_memory().unwrap()),
        broken(&fallback_calls),
    ]);

    store.set("k", b"v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    // The healthy first tier means the fallback is never touched.
    assert_eq!(fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn broken_first_tier_falls_back_wholesale() {
    let tier1_calls = Arc::new(AtomicUsize::new(0));
    let store = TieredStore::new(vec![
        broken(&tier1_calls),
        Box::new(SqliteStore::open_in_memory().unwrap()),
    ]);

    store.set("k", b"v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);
    // Every call first hit (and was demoted from) tier 1.
    assert_eq!(tier1_calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn error_propagates_only_when_every_tier_fails() {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = TieredStore::new(vec![broken(&calls), broken(&calls)]);

    let err = store.set("k", b"v").await.unwrap_err();
    assert!(matches!(err, StorageError::NoTierAvailable(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn empty_chain_reports_no_tier() {
    let store = TieredStore::new(Vec::new());
    assert_eq!(store.tier_count(), 0);
    let err = store.get("k").await.unwrap_err();
    assert!(matches!(err, StorageError::NoTierAvailable(_)));
}
