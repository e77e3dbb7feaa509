//! Debounced change propagation to the remote store.
//!
//! A single state machine (Idle → Pending → Idle) enforces the two
//! debounce invariants in one place: arming while pending cancels and
//! replaces the timer, and the write that eventually fires carries the
//! document as it is at fire time, not as it was when the timer was
//! armed.

use solfa_remote::RemoteStore;
use solfa_types::{Identity, ProgressDocument};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Configuration for the sync scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Quiet period that must elapse after the last mutation before
    /// the remote write fires.
    pub quiet_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            quiet_interval: Duration::from_secs(2),
        }
    }
}

/// Coalesces bursts of document changes into one remote upsert.
pub struct SyncScheduler {
    remote: Arc<dyn RemoteStore>,
    identity: Identity,
    config: SchedulerConfig,
}

impl SyncScheduler {
    /// Creates a scheduler writing to `remote` under `identity`.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteStore>, identity: Identity, config: SchedulerConfig) -> Self {
        Self {
            remote,
            identity,
            config,
        }
    }

    /// Spawns the debounce task over a stream of document snapshots.
    ///
    /// The task runs until the sending store is dropped. A burst of
    /// changes inside one quiet interval produces exactly one upsert,
    /// carrying the latest document.
    pub fn spawn(self, updates: watch::Receiver<ProgressDocument>) -> JoinHandle<()> {
        tokio::spawn(self.run(updates))
    }

    async fn run(self, mut updates: watch::Receiver<ProgressDocument>) {
        'idle: loop {
            if updates.changed().await.is_err() {
                // Store gone; a still-pending write is lost, like a
                // closed tab.
                return;
            }
            loop {
                let quiet = tokio::time::sleep(self.config.quiet_interval);
                tokio::pin!(quiet);
                tokio::select! {
                    () = &mut quiet => {
                        let document = updates.borrow_and_update().clone();
                        self.push(&document).await;
                        continue 'idle;
                    }
                    changed = updates.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        // Cancel and replace the timer.
                    }
                }
            }
        }
    }

    async fn push(&self, document: &ProgressDocument) {
        match self.remote.upsert(&self.identity, document).await {
            Ok(()) => debug!("debounced progress sync pushed"),
            Err(e) => warn!(error = %e, "dropping failed progress sync"),
        }
    }
}
