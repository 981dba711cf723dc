//! Time entries: one contiguous work interval for a project.

use serde::{Deserialize, Serialize};

use crate::duration::WorkDuration;
use crate::error::EntryProblem;
use crate::time::Timestamp;
use crate::types::ProjectName;

/// One work interval.
///
/// An entry without `end_time` is open (still being timed). `duration` is set
/// together with `end_time` when the entry is closed and never otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Project the interval was logged against.
    pub project_name: ProjectName,

    /// When timing started.
    pub begin_time: Timestamp,

    /// When timing stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Timestamp>,

    /// `end_time - begin_time`, truncated to whole minutes.
    #[serde(default, alias = "total_time", skip_serializing_if = "Option::is_none")]
    pub duration: Option<WorkDuration>,
}

impl TimeEntry {
    /// Creates an open entry starting at `begin_time`.
    pub const fn open(project_name: ProjectName, begin_time: Timestamp) -> Self {
        Self {
            project_name,
            begin_time,
            end_time: None,
            duration: None,
        }
    }

    /// Returns true while the entry has no end time.
    pub const fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Closes the entry at `end_time` and records its duration.
    ///
    /// An entry is closed at most once; a second close is rejected and leaves
    /// the original end time and duration in place.
    pub fn close(&mut self, end_time: Timestamp) -> Result<WorkDuration, EntryProblem> {
        if self.end_time.is_some() {
            return Err(EntryProblem::AlreadyClosed);
        }
        let duration = WorkDuration::from_seconds(self.begin_time.seconds_until(end_time));
        self.end_time = Some(end_time);
        self.duration = Some(duration);
        Ok(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn alpha() -> ProjectName {
        ProjectName::new("alpha").unwrap()
    }

    #[test]
    fn close_sets_end_time_and_duration() {
        let mut entry = TimeEntry::open(alpha(), ts("2024-01-01 09:00:00"));
        assert!(entry.is_open());

        let duration = entry.close(ts("2024-01-01 11:30:00")).unwrap();

        assert!(!entry.is_open());
        assert_eq!(entry.end_time, Some(ts("2024-01-01 11:30:00")));
        assert_eq!(duration.to_string(), "2 hours 30 minutes");
        assert_eq!(entry.duration, Some(duration));
    }

    #[test]
    fn closing_twice_is_rejected() {
        let mut entry = TimeEntry::open(alpha(), ts("2024-01-01 09:00:00"));
        entry.close(ts("2024-01-01 10:00:00")).unwrap();

        let err = entry.close(ts("2024-01-01 12:00:00")).unwrap_err();

        assert_eq!(err, EntryProblem::AlreadyClosed);
        assert_eq!(entry.end_time, Some(ts("2024-01-01 10:00:00")));
        assert_eq!(entry.duration.unwrap().to_string(), "1 hours 0 minutes");
    }

    #[test]
    fn open_entry_serializes_without_end_fields() {
        let entry = TimeEntry::open(alpha(), ts("2024-01-01 09:00:00"));
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"project_name":"alpha","begin_time":"2024-01-01 09:00:00"}"#
        );
    }

    #[test]
    fn closed_entry_serializes_duration_as_text() {
        let mut entry = TimeEntry::open(alpha(), ts("2024-01-01 09:00:00"));
        entry.close(ts("2024-01-01 11:30:00")).unwrap();
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["end_time"], "2024-01-01 11:30:00");
        assert_eq!(json["duration"], "2 hours 30 minutes");
    }

    #[test]
    fn accepts_legacy_total_time_key() {
        let json = r#"{
            "project_name": "alpha",
            "begin_time": "2024-01-01 09:00:00",
            "end_time": "2024-01-01 09:45:10",
            "total_time": "0 hours 45 minutes"
        }"#;
        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.duration.unwrap().to_string(), "0 hours 45 minutes");
    }
}
