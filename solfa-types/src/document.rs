//! The persisted progress aggregate.
//!
//! One `ProgressDocument` exists per identity. It is the explicit
//! serialization boundary of the system: exactly the fields that are
//! persisted locally and mirrored 1:1 to the remote record, nothing
//! transient or derived.

use crate::{ActiveDate, LevelCompletion};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A learner's full progress state.
///
/// `Default` is the empty first-run document. Every field carries a
/// serde default so documents written by older builds (or partially
/// migrated rows) still parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressDocument {
    /// Submodule identifiers the learner has completed. Set semantics.
    pub completed_submodules: BTreeSet<String>,
    /// Best-known completion state per game-level key.
    pub completed_levels: BTreeMap<String, LevelCompletion>,
    /// Best score per submodule, 0–100. Values only increase.
    pub submodule_scores: BTreeMap<String, u8>,
    /// Lifetime experience points.
    pub total_xp: u32,
    /// Current consecutive-day streak.
    pub streak_days: u32,
    /// Most recent day with any recorded activity.
    pub last_active_date: Option<ActiveDate>,
    /// Number of practice sessions finished.
    pub practice_sessions_completed: u32,
    /// Total minutes spent in practice sessions.
    pub total_practice_minutes: u32,
    /// The module the learner is currently on. Device-local cursor,
    /// not subject to best-of semantics.
    pub current_module_id: Option<String>,
    /// The submodule the learner is currently on. Device-local cursor.
    pub current_submodule_id: Option<String>,
}
