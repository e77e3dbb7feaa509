//! Shared test doubles for the progress engine tests.

#![allow(dead_code)]

use async_trait::async_trait;
use solfa_remote::{RemoteError, RemoteResult, RemoteStore};
use solfa_storage::{KeyValueStore, StorageError, StorageResult};
use solfa_types::{Identity, ProgressDocument};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory remote store that records every call.
pub struct FakeRemote {
    stored: Mutex<Option<ProgressDocument>>,
    upserts: Mutex<Vec<ProgressDocument>>,
    load_calls: AtomicUsize,
    upsert_calls: AtomicUsize,
    fail: bool,
}

impl FakeRemote {
    /// A remote with no record yet (brand-new identity).
    pub fn empty() -> Self {
        Self {
            stored: Mutex::new(None),
            upserts: Mutex::new(Vec::new()),
            load_calls: AtomicUsize::new(0),
            upsert_calls: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A remote already holding a record for the identity.
    pub fn with_document(document: ProgressDocument) -> Self {
        Self {
            stored: Mutex::new(Some(document)),
            ..Self::empty()
        }
    }

    /// A remote where every call fails (network down).
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::empty()
        }
    }

    /// Successful upserts, in order.
    pub fn upsert_count(&self) -> usize {
        self.upserts.lock().unwrap().len()
    }

    pub fn last_upsert(&self) -> Option<ProgressDocument> {
        self.upserts.lock().unwrap().last().cloned()
    }

    pub fn stored(&self) -> Option<ProgressDocument> {
        self.stored.lock().unwrap().clone()
    }

    /// Load attempts, successful or not.
    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    /// Upsert attempts, successful or not.
    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn load(&self, _identity: &Identity) -> RemoteResult<Option<ProgressDocument>> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RemoteError::Status { status: 503 });
        }
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn upsert(&self, _identity: &Identity, document: &ProgressDocument) -> RemoteResult<()> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RemoteError::Status { status: 503 });
        }
        *self.stored.lock().unwrap() = Some(document.clone());
        self.upserts.lock().unwrap().push(document.clone());
        Ok(())
    }
}

/// A key-value store where every call fails, standing in for an
/// environment with storage disabled entirely.
pub struct DeadStore;

#[async_trait]
impl KeyValueStore for DeadStore {
    async fn get(&self, _name: &str) -> StorageResult<Option<Vec<u8>>> {
        Err(StorageError::NoTierAvailable("storage disabled".to_string()))
    }

    async fn set(&self, _name: &str, _value: &[u8]) -> StorageResult<()> {
        Err(StorageError::NoTierAvailable("storage disabled".to_string()))
    }

    async fn remove(&self, _name: &str) -> StorageResult<()> {
        Err(StorageError::NoTierAvailable("storage disabled".to_string()))
    }
}
