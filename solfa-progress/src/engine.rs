//! Startup orchestration and the consumer-facing engine.
//!
//! Bootstrap order matters: the local document is loaded first (fast,
//! must complete before the UI is ready), then the remote record is
//! fetched, merged, and the result pushed back to both sides
//! (read-repair) before the debounced scheduler starts. The read-repair
//! write is awaited so an early mutation's debounced write can never
//! overwrite the just-computed merge with stale data.

use crate::{
    IdentityProvider, ModuleCatalog, ProgressStore, SchedulerConfig, SyncScheduler,
};
use solfa_remote::{HttpRemoteStore, RemoteConfig, RemoteStore};
use solfa_storage::{FileStore, KeyValueStore, SqliteStore, TieredStore};
use solfa_types::{ActiveDate, Identity, ProgressDocument};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Configuration for a full engine bootstrap.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory for the database file, the fallback file store, and
    /// the identity key.
    pub data_dir: PathBuf,
    /// Static module layout for derived completion percentages.
    pub catalog: ModuleCatalog,
    /// Remote endpoint; `None` runs local-only.
    pub remote: Option<RemoteConfig>,
    /// Debounce tuning.
    pub scheduler: SchedulerConfig,
}

impl EngineConfig {
    /// Config rooted at `data_dir`, with the remote taken from the
    /// environment and default debounce tuning.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>, catalog: ModuleCatalog) -> Self {
        Self {
            data_dir: data_dir.into(),
            catalog,
            remote: RemoteConfig::from_env(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

/// The assembled progress engine handed to the UI layer.
pub struct ProgressEngine {
    identity: Identity,
    store: Arc<ProgressStore>,
    remote: Option<Arc<dyn RemoteStore>>,
}

impl ProgressEngine {
    /// Opens the default storage tiers and bootstraps.
    ///
    /// Never fails: a missing database engine demotes to plain files,
    /// an unreachable remote demotes to local-only.
    pub async fn bootstrap(config: EngineConfig) -> Self {
        let mut tiers: Vec<Box<dyn KeyValueStore>> = Vec::new();
        match SqliteStore::open(&config.data_dir.join("progress.db")) {
            Ok(store) => tiers.push(Box::new(store)),
            Err(e) => {
                warn!(error = %e, "database engine unavailable, falling back to plain files");
            }
        }
        tiers.push(Box::new(FileStore::new(config.data_dir.join("fallback"))));
        let storage: Arc<dyn KeyValueStore> = Arc::new(TieredStore::new(tiers));

        // The identity key lives beside, not inside, the tiered
        // document store so it survives a corrupt-document reset.
        let identity_store: Arc<dyn KeyValueStore> =
            Arc::new(FileStore::new(config.data_dir.join("keys")));

        let remote = config
            .remote
            .map(|cfg| Arc::new(HttpRemoteStore::new(cfg)) as Arc<dyn RemoteStore>);

        Self::bootstrap_with(storage, identity_store, remote, config.catalog, config.scheduler)
            .await
    }

    /// Bootstraps over explicit collaborators.
    pub async fn bootstrap_with(
        storage: Arc<dyn KeyValueStore>,
        identity_store: Arc<dyn KeyValueStore>,
        remote: Option<Arc<dyn RemoteStore>>,
        catalog: ModuleCatalog,
        scheduler_config: SchedulerConfig,
    ) -> Self {
        let store = Arc::new(ProgressStore::load(storage, catalog).await);
        let identity = IdentityProvider::new(identity_store).get_identity().await;

        let remote = match remote {
            Some(remote) => Self::reconcile(&store, &identity, remote).await,
            None => {
                info!("remote sync not configured, running local-only");
                None
            }
        };

        if let Some(remote) = &remote {
            SyncScheduler::new(Arc::clone(remote), identity.clone(), scheduler_config)
                .spawn(store.subscribe());
        }

        Self {
            identity,
            store,
            remote,
        }
    }

    /// Reconciles local and remote state. Returns the remote handle if
    /// it is usable for the rest of the session, `None` otherwise.
    async fn reconcile(
        store: &Arc<ProgressStore>,
        identity: &Identity,
        remote: Arc<dyn RemoteStore>,
    ) -> Option<Arc<dyn RemoteStore>> {
        let local = store.document();
        match remote.load(identity).await {
            Ok(Some(remote_doc)) => {
                let merged = solfa_merge::merge(&local, &remote_doc);
                store.apply_merged(merged.clone()).await;
                match remote.upsert(identity, &merged).await {
                    Ok(()) => {
                        info!("progress reconciled with remote");
                        Some(remote)
                    }
                    Err(e) => {
                        warn!(error = %e, "read-repair failed, continuing local-only");
                        None
                    }
                }
            }
            Ok(None) => match remote.upsert(identity, &local).await {
                Ok(()) => {
                    info!("seeded remote with local progress");
                    Some(remote)
                }
                Err(e) => {
                    warn!(error = %e, "could not seed remote, continuing local-only");
                    None
                }
            },
            Err(e) => {
                warn!(error = %e, "remote unreachable, continuing local-only");
                None
            }
        }
    }

    // ── Action surface ───────────────────────────────────────────

    /// Marks a submodule completed.
    pub async fn complete_submodule(&self, id: &str) {
        self.store.complete_submodule(id).await;
    }

    /// Records a submodule quiz score.
    pub async fn set_submodule_score(&self, id: &str, score: u8) {
        self.store.set_submodule_score(id, score).await;
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
        self.store
            .set_level_score(key, percentage, required_score, xp_reward, elapsed)
            .await;
    }

    /// Counts a finished practice session.
    pub async fn record_practice_session(&self, minutes: u32) {
        self.store.record_practice_session(minutes).await;
    }

    /// Updates the activity streak.
    pub async fn record_daily_activity(&self, today: &ActiveDate) {
        self.store.record_daily_activity(today).await;
    }

    /// Moves the learner's cursor.
    pub async fn set_current_position(&self, module_id: &str, submodule_id: &str) {
        self.store.set_current_position(module_id, submodule_id).await;
    }

    /// Wipes all progress and pushes the empty document to the remote
    /// immediately, bypassing the debounce window.
    pub async fn reset_progress(&self) {
        let empty = self.store.reset_progress().await;
        if let Some(remote) = &self.remote {
            if let Err(e) = remote.upsert(&self.identity, &empty).await {
                warn!(error = %e, "reset not propagated to remote");
            }
        }
    }

    // ── Read accessors ───────────────────────────────────────────

    /// This device's anonymous identity.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// The underlying state container.
    #[must_use]
    pub fn store(&self) -> &Arc<ProgressStore> {
        &self.store
    }

    /// A snapshot of the current document.
    #[must_use]
    pub fn document(&self) -> ProgressDocument {
        self.store.document()
    }

    /// Whether remote sync survived bootstrap.
    #[must_use]
    pub fn sync_active(&self) -> bool {
        self.remote.is_some()
    }
}
