//! Per-level completion records.
//!
//! A record never regresses: every field is combined monotonically so a
//! worse later attempt cannot erase a better earlier one.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Maps a score percentage to a star rating.
///
/// Fixed thresholds: 100 → 3, 80 → 2, 60 → 1, below → 0.
#[must_use]
pub fn stars_for(percentage: u8) -> u8 {
    match percentage {
        p if p >= 100 => 3,
        p if p >= 80 => 2,
        p if p >= 60 => 1,
        _ => 0,
    }
}

/// Best-known completion state for one game level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCompletion {
    /// Best score percentage, 0–100.
    pub percentage: u8,
    /// Best star rating, 0–3.
    pub stars: u8,
    /// Whether the level has ever been passed.
    pub passed: bool,
    /// Fastest completion time, when one has been recorded.
    #[serde(default, with = "duration_ms")]
    pub best_time: Option<Duration>,
}

impl LevelCompletion {
    /// Combines two records for the same level key.
    ///
    /// `percentage` and `stars` take the max, `passed` is sticky, and
    /// `best_time` takes the min of whatever is present (smaller is
    /// better).
    #[must_use]
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            percentage: self.percentage.max(other.percentage),
            stars: self.stars.max(other.stars),
            passed: self.passed || other.passed,
            best_time: match (self.best_time, other.best_time) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }
}

/// Serializes `best_time` as integer milliseconds, mirroring the column
/// type on the remote side.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
