//! Local-first progress persistence and synchronization.
//!
//! This crate assembles the pieces the rest of the application talks
//! to:
//!
//! - [`IdentityProvider`] — stable anonymous identity per device
//! - [`ProgressStore`] — the explicit state container holding the
//!   progress document, its action surface, and a subscribe/notify
//!   channel (no ambient global state)
//! - [`actions`] — the pure reducers behind every mutation
//! - [`SyncScheduler`] — debounced change propagation to the remote
//! - [`ProgressEngine`] — startup orchestration: load local, reconcile
//!   with the remote, read-repair, then serve the UI
//!
//! Local state is authoritative for the running session; remote sync
//! is advisory and must never block or break the learner's progress.

pub mod actions;
mod catalog;
mod engine;
mod identity;
mod scheduler;
mod store;

pub use catalog::ModuleCatalog;
pub use engine::{EngineConfig, ProgressEngine};
pub use identity::{IdentityProvider, IDENTITY_KEY};
pub use scheduler::{SchedulerConfig, SyncScheduler};
pub use store::{ProgressStore, PROGRESS_KEY};
