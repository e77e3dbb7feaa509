//! Tiered durable key-value storage.
//!
//! The progress document is persisted through a ranked list of storage
//! backends behind one narrow interface:
//!
//! - [`SqliteStore`] — tier 1: a transactional SQLite file whose schema
//!   is created on first open
//! - [`FileStore`] — tier 2: one file per key, used when the database
//!   engine is unusable (quota, permissions, read-only media)
//! - [`TieredStore`] — the chain: each call tries tiers in order and
//!   returns the first success; a call never mixes tiers for one key
//!
//! Storage is best-effort from the caller's perspective: only when the
//! last tier fails does an error propagate, signalling that the
//! environment offers no persistence at all.

mod error;
mod file_store;
mod sqlite_store;
mod tiered;

pub use error::{StorageError, StorageResult};
pub use file_store::FileStore;
pub use sqlite_store::SqliteStore;
pub use tiered::TieredStore;

use async_trait::async_trait;

/// A single-key-atomic asynchronous key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `name`, or `None` if absent.
    async fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Stores `value` under `name`, replacing any previous value.
    async fn set(&self, name: &str, value: &[u8]) -> StorageResult<()>;

    /// Deletes the value under `name`. Removing an absent key is not an
    /// error.
    async fn remove(&self, name: &str) -> StorageResult<()>;
}
