//! Pure state-transition functions over the progress document.
//!
//! Every action takes the current document and returns the full next
//! document; there is no event log and no undo. Reducers never fail
//! and never do I/O; persistence and sync happen in
//! [`crate::ProgressStore`] after the new document is computed.

use solfa_types::{stars_for, ActiveDate, LevelCompletion, ProgressDocument};
use std::time::Duration;

/// XP granted the first time a submodule is completed.
pub const SUBMODULE_XP: u32 = 50;
/// One-time bonus when a submodule's best score first reaches 100.
pub const PERFECT_SCORE_XP: u32 = 25;
/// Replaying an already-passed level earns `xp_reward / REPLAY_XP_DIVISOR`.
pub const REPLAY_XP_DIVISOR: u32 = 4;

/// Marks a submodule completed. Idempotent: the XP award is granted
/// exactly once per id for the document's lifetime.
#[must_use]
pub fn complete_submodule(doc: &ProgressDocument, id: &str) -> ProgressDocument {
    if doc.completed_submodules.contains(id) {
        return doc.clone();
    }
    let mut next = doc.clone();
    next.completed_submodules.insert(id.to_string());
    next.total_xp = next.total_xp.saturating_add(SUBMODULE_XP);
    next
}

/// Records a submodule quiz score, keeping the best of old and new.
///
/// The perfect-score bonus is granted the first time the best score
/// reaches 100, and never again.
#[must_use]
pub fn set_submodule_score(doc: &ProgressDocument, id: &str, score: u8) -> ProgressDocument {
    let score = score.min(100);
    let previous = doc.submodule_scores.get(id).copied().unwrap_or(0);
    let best = previous.max(score);

    let mut next = doc.clone();
    next.submodule_scores.insert(id.to_string(), best);
    if previous < 100 && best == 100 {
        next.total_xp = next.total_xp.saturating_add(PERFECT_SCORE_XP);
    }
    next
}

/// Records a game-level attempt.
///
/// The stored record only ever improves. The full `xp_reward` is paid
/// on the first transition from not-passed to passed; a passing replay
/// pays a quarter of it; a failing attempt pays nothing.
#[must_use]
pub fn set_level_score(
    doc: &ProgressDocument,
    key: &str,
    percentage: u8,
    required_score: u8,
    xp_reward: u32,
    elapsed: Option<Duration>,
) -> ProgressDocument {
    let percentage = percentage.min(100);
    let passed = percentage >= required_score;
    let attempt = LevelCompletion {
        percentage,
        stars: stars_for(percentage),
        passed,
        best_time: elapsed,
    };

    let previously_passed = doc.completed_levels.get(key).is_some_and(|c| c.passed);

    let mut next = doc.clone();
    let record = match next.completed_levels.get(key) {
        Some(existing) => existing.combine(&attempt),
        None => attempt,
    };
    next.completed_levels.insert(key.to_string(), record);

    if passed {
        let award = if previously_passed {
            xp_reward / REPLAY_XP_DIVISOR
        } else {
            xp_reward
        };
        next.total_xp = next.total_xp.saturating_add(award);
    }
    next
}

/// Counts a finished practice session.
#[must_use]
pub fn record_practice_session(doc: &ProgressDocument, minutes: u32) -> ProgressDocument {
    let mut next = doc.clone();
    next.practice_sessions_completed = next.practice_sessions_completed.saturating_add(1);
    next.total_practice_minutes = next.total_practice_minutes.saturating_add(minutes);
    next
}

/// Updates the activity streak for `today`.
///
/// Same-day activity is a no-op; the day after the last active date
/// extends the streak; a gap restarts it at 1. A `today` earlier than
/// the recorded date (clock adjustment) changes nothing: the document
/// never moves backwards.
#[must_use]
pub fn record_daily_activity(doc: &ProgressDocument, today: &ActiveDate) -> ProgressDocument {
    let mut next = doc.clone();
    match &doc.last_active_date {
        Some(prev) if prev == today => return next,
        Some(prev) if today.is_day_after(prev) => {
            next.streak_days = next.streak_days.saturating_add(1);
        }
        Some(prev) if today > prev => next.streak_days = 1,
        Some(_) => return next,
        None => next.streak_days = 1,
    }
    next.last_active_date = Some(today.clone());
    next
}

/// Moves the learner's cursor. Plain last-intent, no best-of.
#[must_use]
pub fn set_current_position(
    doc: &ProgressDocument,
    module_id: &str,
    submodule_id: &str,
) -> ProgressDocument {
    let mut next = doc.clone();
    next.current_module_id = Some(module_id.to_string());
    next.current_submodule_id = Some(submodule_id.to_string());
    next
}
