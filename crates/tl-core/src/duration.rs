//! Duration aggregation over closed entries.
//!
//! Elapsed seconds are summed first and truncated to whole hours and minutes
//! only once, at the end. Leftover seconds are discarded, never rounded, so a
//! report total can be smaller than the sum of its rendered entry durations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;
use crate::error::EntryProblem;
use crate::types::ValidationError;

const SECONDS_PER_HOUR: i64 = 3600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Whole hours and minutes, rendered as `H hours M minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl WorkDuration {
    /// Truncates a number of elapsed seconds.
    ///
    /// Uses floor division so a negative total (a clock stepped backwards)
    /// renders the same way the historical reports did.
    pub const fn from_seconds(total: i64) -> Self {
        Self {
            hours: total.div_euclid(SECONDS_PER_HOUR),
            minutes: total.rem_euclid(SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }
}

impl fmt::Display for WorkDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hours {} minutes", self.hours, self.minutes)
    }
}

impl FromStr for WorkDuration {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidDuration {
            value: s.to_string(),
        };
        let parts: Vec<&str> = s.split_whitespace().collect();
        let [hours, "hours", minutes, "minutes"] = parts.as_slice() else {
            return Err(invalid());
        };
        Ok(Self {
            hours: hours.parse().map_err(|_| invalid())?,
            minutes: minutes.parse().map_err(|_| invalid())?,
        })
    }
}

impl Serialize for WorkDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WorkDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Sums the elapsed seconds of closed entries.
///
/// Fails on the first open entry, since its interval has no end yet.
pub fn elapsed_seconds<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
) -> Result<i64, EntryProblem> {
    entries.into_iter().try_fold(0_i64, |total, entry| {
        let end = entry.end_time.ok_or(EntryProblem::OpenEntryInTotal)?;
        Ok(total + entry.begin_time.seconds_until(end))
    })
}

/// Aggregates closed entries into a single truncated duration.
pub fn aggregate<'a>(
    entries: impl IntoIterator<Item = &'a TimeEntry>,
) -> Result<WorkDuration, EntryProblem> {
    elapsed_seconds(entries).map(WorkDuration::from_seconds)
}
