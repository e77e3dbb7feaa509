//! Calendar-date strings for activity tracking.
//!
//! Dates are kept as `YYYY-MM-DD` strings because that format sorts
//! correctly under plain lexicographic comparison, which is what the
//! merge rules rely on. Parsing back into a real date is only needed
//! for streak arithmetic.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar date in `YYYY-MM-DD` form.
///
/// `Ord` is the derived string ordering; for well-formed values the
/// lexicographic maximum is the later date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveDate(String);

impl ActiveDate {
    /// The canonical date format.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Wraps an existing date string. Not validated; malformed strings
    /// still compare and merge as plain strings.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }

    /// Today's date in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
    }

    /// Converts a chrono date into the canonical string form.
    #[must_use]
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format(Self::FORMAT).to_string())
    }

    /// Returns the date as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn parse(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, Self::FORMAT).ok()
    }

    /// True if `self` is exactly one calendar day after `prev`.
    ///
    /// Total: malformed dates never panic, they simply are not
    /// consecutive with anything.
    #[must_use]
    pub fn is_day_after(&self, prev: &ActiveDate) -> bool {
        match (self.parse(), prev.parse()) {
            (Some(day), Some(prev_day)) => prev_day.succ_opt() == Some(day),
            _ => false,
        }
    }
}

impl fmt::Display for ActiveDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
