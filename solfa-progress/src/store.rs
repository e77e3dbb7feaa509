//! The progress state container.
//!
//! `ProgressStore` owns the in-memory document exclusively; storage and
//! remote are only ever touched through their narrow interfaces. It is
//! an explicit object handed to callers, and mutation notifies
//! subscribers through a watch channel rather than any ambient
//! module-level state.

use crate::{actions, ModuleCatalog};
use solfa_storage::KeyValueStore;
use solfa_types::{ActiveDate, ProgressDocument};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tracing::warn;

/// Namespaced key for the serialized progress document.
pub const PROGRESS_KEY: &str = "solfa.progress.v1";

/// Holds the progress document and its action surface.
///
/// Every action computes the next document with a pure reducer,
/// persists it (best-effort) and notifies subscribers. Actions never
/// fail from the caller's point of view: an I/O problem must not block
/// a learner's in-session progress.
pub struct ProgressStore {
    document: RwLock<ProgressDocument>,
    storage: Arc<dyn KeyValueStore>,
    catalog: ModuleCatalog,
    updates: watch::Sender<ProgressDocument>,
}

impl ProgressStore {
    /// Rehydrates the store from local storage.
    ///
    /// A missing document means first run; a corrupt one falls back to
    /// the empty document rather than propagating a parse error.
    pub async fn load(storage: Arc<dyn KeyValueStore>, catalog: ModuleCatalog) -> Self {
        let document = match storage.get(PROGRESS_KEY).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(doc) => doc,
                Err(e) => {
                    warn!(error = %e, "stored progress document is corrupt, starting fresh");
                    ProgressDocument::default()
                }
            },
            Ok(None) => ProgressDocument::default(),
            Err(e) => {
                warn!(error = %e, "local storage unreadable, starting with empty progress");
                ProgressDocument::default()
            }
        };
        let (updates, _) = watch::channel(document.clone());
        Self {
            document: RwLock::new(document),
            storage,
            catalog,
            updates,
        }
    }

    // ── Actions ──────────────────────────────────────────────────

    /// Marks a submodule completed (idempotent, one-time XP).
    pub async fn complete_submodule(&self, id: &str) {
        let next = actions::complete_submodule(&self.document(), id);
        self.commit(next).await;
    }

    /// Records a submodule quiz score (best-of).
    pub async fn set_submodule_score(&self, id: &str, score: u8) {
        let next = actions::set_submodule_score(&self.document(), id, score);
        self.commit(next).await;
    }

    /// Records a game-level attempt.
    pub async fn set_level_score(
        &self,
        key: &str,
        percentage: u8,
        required_score: u8,
        xp_reward: u32,
        elapsed: Option<Duration>,
    ) {
        let next = actions::set_level_score(
            &self.document(),
            key,
            percentage,
            required_score,
            xp_reward,
            elapsed,
        );
        self.commit(next).await;
    }

    /// Counts a finished practice session.
    pub async fn record_practice_session(&self, minutes: u32) {
        let next = actions::record_practice_session(&self.document(), minutes);
        self.commit(next).await;
    }

    /// Updates the activity streak for the given day.
    pub async fn record_daily_activity(&self, today: &ActiveDate) {
        let next = actions::record_daily_activity(&self.document(), today);
        self.commit(next).await;
    }

    /// Moves the learner's cursor.
    pub async fn set_current_position(&self, module_id: &str, submodule_id: &str) {
        let next = actions::set_current_position(&self.document(), module_id, submodule_id);
        self.commit(next).await;
    }

    /// Replaces the document with a fresh empty one.
    ///
    /// Returns the empty snapshot so the caller can push it to the
    /// remote immediately, bypassing the debounce window.
    pub async fn reset_progress(&self) -> ProgressDocument {
        let empty = ProgressDocument::default();
        self.commit(empty.clone()).await;
        empty
    }

    /// Installs a reconciled document (bootstrap read-repair).
    pub async fn apply_merged(&self, merged: ProgressDocument) {
        self.commit(merged).await;
    }

    // ── Read accessors ───────────────────────────────────────────

    /// A snapshot of the current document.
    #[must_use]
    pub fn document(&self) -> ProgressDocument {
        self.document.read().unwrap().clone()
    }

    /// Whether the learner has completed the submodule.
    #[must_use]
    pub fn is_submodule_completed(&self, id: &str) -> bool {
        self.document.read().unwrap().completed_submodules.contains(id)
    }

    /// Derived module completion, 0–100.
    #[must_use]
    pub fn module_completion_percent(&self, module_id: &str) -> u8 {
        let doc = self.document.read().unwrap();
        self.catalog
            .completion_percent(module_id, &doc.completed_submodules)
    }

    /// Subscribes to document updates. The receiver sees every change
    /// committed after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProgressDocument> {
        self.updates.subscribe()
    }

    // ── Internals ────────────────────────────────────────────────

    async fn commit(&self, next: ProgressDocument) {
        *self.document.write().unwrap() = next.clone();
        self.persist(&next).await;
        self.updates.send_replace(next);
    }

    async fn persist(&self, document: &ProgressDocument) {
        let bytes = match serde_json::to_vec(document) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "progress document failed to serialize");
                return;
            }
        };
        if let Err(e) = self.storage.set(PROGRESS_KEY, &bytes).await {
            warn!(error = %e, "progress not persisted, continuing in memory");
        }
    }
}
