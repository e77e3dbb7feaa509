//! Deterministic field-wise merge for progress documents.
//!
//! [`merge`] reconciles a local snapshot against a remote snapshot
//! without losing recorded progress. Field rules:
//!
//! - `completed_submodules` — set union
//! - `completed_levels` — key-wise union; both-present keys combine
//!   monotonically (max percentage/stars, sticky passed, min best time)
//! - `submodule_scores` — key-wise max
//! - scalar counters (`total_xp`, `streak_days`,
//!   `practice_sessions_completed`, `total_practice_minutes`) — max
//! - `last_active_date` — lexicographically greater string (the later
//!   date, given the sortable format)
//! - `current_module_id` / `current_submodule_id` — local wins
//!   unconditionally; where the learner currently is is a device-local
//!   notion, not a fact to reconcile
//!
//! On every field except the two cursors the merge is commutative,
//! associative, and idempotent, so replicas converge regardless of the
//! order snapshots are exchanged in.

use solfa_types::ProgressDocument;

/// Merges a remote progress snapshot into a local one.
///
/// Pure and total: no I/O, never panics, inputs are not modified.
#[must_use]
pub fn merge(local: &ProgressDocument, remote: &ProgressDocument) -> ProgressDocument {
    let mut completed_levels = local.completed_levels.clone();
    for (key, remote_record) in &remote.completed_levels {
        completed_levels
            .entry(key.clone())
            .and_modify(|local_record| *local_record = local_record.combine(remote_record))
            .or_insert(*remote_record);
    }

    let mut submodule_scores = local.submodule_scores.clone();
    for (id, &remote_score) in &remote.submodule_scores {
        submodule_scores
            .entry(id.clone())
            .and_modify(|local_score| *local_score = (*local_score).max(remote_score))
            .or_insert(remote_score);
    }

    ProgressDocument {
        completed_submodules: local
            .completed_submodules
            .union(&remote.completed_submodules)
            .cloned()
            .collect(),
        completed_levels,
        submodule_scores,
        total_xp: local.total_xp.max(remote.total_xp),
        streak_days: local.streak_days.max(remote.streak_days),
        last_active_date: local
            .last_active_date
            .clone()
            .max(remote.last_active_date.clone()),
        practice_sessions_completed: local
            .practice_sessions_completed
            .max(remote.practice_sessions_completed),
        total_practice_minutes: local
            .total_practice_minutes
            .max(remote.total_practice_minutes),
        current_module_id: local.current_module_id.clone(),
        current_submodule_id: local.current_submodule_id.clone(),
    }
}
