//! The ranked storage chain.

use crate::{KeyValueStore, StorageError, StorageResult};
use async_trait::async_trait;
use tracing::warn;

/// A ranked list of storage backends.
///
/// Each operation walks the tiers in order and returns the first
/// success. A failing tier is logged and silently demoted; only when
/// the final tier also fails does the error reach the caller. A call
/// either fully succeeds on one tier or moves wholesale to the next;
/// tiers are never mixed for the same key within one call.
pub struct TieredStore {
    tiers: Vec<Box<dyn KeyValueStore>>,
}

impl TieredStore {
    /// Builds a chain from backends ranked most- to least-preferred.
    #[must_use]
    pub fn new(tiers: Vec<Box<dyn KeyValueStore>>) -> Self {
        Self { tiers }
    }

    /// Number of configured tiers.
    #[must_use]
    pub fn tier_count(&self) -> usize {
        self.tiers.len()
    }

    fn no_tiers() -> StorageError {
        StorageError::NoTierAvailable("no storage tiers configured".to_string())
    }
}

#[async_trait]
impl KeyValueStore for TieredStore {
    async fn get(&self, name: &str) -> StorageResult<Option<Vec<u8>>> {
        let mut last_err = None;
        for (rank, tier) in self.tiers.iter().enumerate() {
            match tier.get(name).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!(name, rank, error = %e, "storage tier get failed, falling back");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(Self::no_tiers))
    }

    async fn set(&self, name: &str, value: &[u8]) -> StorageResult<()> {
        let mut last_err = None;
        for (rank, tier) in self.tiers.iter().enumerate() {
            match tier.set(name, value).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(name, rank, error = %e, "storage tier set failed, falling back");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(Self::no_tiers))
    }

    async fn remove(&self, name: &str) -> StorageResult<()> {
        let mut last_err = None;
        for (rank, tier) in self.tiers.iter().enumerate() {
            match tier.remove(name).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    warn!(name, rank, error = %e, "storage tier remove failed, falling back");
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(Self::no_tiers))
    }
}
