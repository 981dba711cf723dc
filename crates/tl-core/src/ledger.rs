//! The persisted record: tracking status plus every project's entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::entry::TimeEntry;
use crate::types::ProjectName;

/// Which project is being tracked and whether timing is suspended.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActiveState {
    #[serde(default)]
    pub active_project: Option<ProjectName>,
    #[serde(default)]
    pub paused: bool,
}

/// The three tracking states, derived from [`ActiveState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackingState {
    /// No active project.
    Idle,
    /// Active project with an open entry.
    Running(ProjectName),
    /// Active project whose last entry is closed.
    Paused(ProjectName),
}

impl ActiveState {
    /// Tracking `project`, not paused.
    pub const fn running(project: ProjectName) -> Self {
        Self {
            active_project: Some(project),
            paused: false,
        }
    }

    /// Tracking `project`, paused.
    pub const fn paused(project: ProjectName) -> Self {
        Self {
            active_project: Some(project),
            paused: true,
        }
    }

    /// Derives the tracking state. A paused flag without a project reads as idle.
    pub fn tracking_state(&self) -> TrackingState {
        match (&self.active_project, self.paused) {
            (None, _) => TrackingState::Idle,
            (Some(project), false) => TrackingState::Running(project.clone()),
            (Some(project), true) => TrackingState::Paused(project.clone()),
        }
    }
}

/// Tracking status and the entry log, persisted together as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(flatten)]
    pub active: ActiveState,

    /// Entries per project, each sequence in chronological order.
    #[serde(default)]
    pub projects: BTreeMap<ProjectName, Vec<TimeEntry>>,
}

impl Ledger {
    /// Restores the `paused implies active_project` invariant on loaded data.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.active.active_project.is_none() && self.active.paused {
            tracing::debug!("clearing paused flag without an active project");
            self.active.paused = false;
        }
        self
    }

    /// The current tracking state.
    pub fn state(&self) -> TrackingState {
        self.active.tracking_state()
    }

    /// A project's entries, empty if the project is unknown.
    pub fn entries(&self, project: &ProjectName) -> &[TimeEntry] {
        self.projects
            .get(project)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Appends an entry to the end of a project's sequence.
    pub fn append_entry(&mut self, project: &ProjectName, entry: TimeEntry) {
        self.projects.entry(project.clone()).or_default().push(entry);
    }

    /// Overwrites a project's entire sequence.
    pub fn replace_entries(&mut self, project: &ProjectName, entries: Vec<TimeEntry>) {
        self.projects.insert(project.clone(), entries);
    }

    /// The last entry of a project, if any.
    pub fn last_entry(&self, project: &ProjectName) -> Option<&TimeEntry> {
        self.entries(project).last()
    }

    pub(crate) fn last_entry_mut(&mut self, project: &ProjectName) -> Option<&mut TimeEntry> {
        self.projects.get_mut(project).and_then(|entries| entries.last_mut())
    }

    /// Total number of entries across all projects.
    pub fn entry_count(&self) -> usize {
        self.projects.values().map(Vec::len).sum()
    }

    /// True when nothing is active and no entries exist.
    pub fn is_empty(&self) -> bool {
        self.active.active_project.is_none() && self.entry_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Timestamp;

    fn name(s: &str) -> ProjectName {
        ProjectName::new(s).unwrap()
    }

    fn closed(project: &str, begin: &str, end: &str) -> TimeEntry {
        let mut entry = TimeEntry::open(name(project), Timestamp::parse(begin).unwrap());
        entry.close(Timestamp::parse(end).unwrap()).unwrap();
        entry
    }

    #[test]
    fn tracking_state_from_active_state() {
        assert_eq!(ActiveState::default().tracking_state(), TrackingState::Idle);
        assert_eq!(
            ActiveState::running(name("alpha")).tracking_state(),
            TrackingState::Running(name("alpha"))
        );
        assert_eq!(
            ActiveState::paused(name("alpha")).tracking_state(),
            TrackingState::Paused(name("alpha"))
        );
    }

    #[test]
    fn normalized_clears_orphan_pause_flag() {
        let ledger = Ledger {
            active: ActiveState {
                active_project: None,
                paused: true,
            },
            projects: BTreeMap::new(),
        };
        assert_eq!(ledger.normalized().active, ActiveState::default());
    }

    #[test]
    fn unknown_project_has_no_entries() {
        let ledger = Ledger::default();
        assert!(ledger.entries(&name("missing")).is_empty());
        assert!(ledger.last_entry(&name("missing")).is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn append_preserves_order_and_replace_overwrites() {
        let alpha = name("alpha");
        let mut ledger = Ledger::default();
        let first = closed("alpha", "2024-01-01 09:00:00", "2024-01-01 10:00:00");
        let second = closed("alpha", "2024-01-01 11:00:00", "2024-01-01 12:00:00");

        ledger.append_entry(&alpha, first.clone());
        ledger.append_entry(&alpha, second.clone());
        assert_eq!(ledger.entries(&alpha), [first.clone(), second]);

        ledger.replace_entries(&alpha, vec![first.clone()]);
        assert_eq!(ledger.entries(&alpha), [first]);
        assert_eq!(ledger.entry_count(), 1);
    }

    #[test]
    fn json_layout_flattens_active_state() {
        let alpha = name("alpha");
        let mut ledger = Ledger {
            active: ActiveState::paused(alpha.clone()),
            projects: BTreeMap::new(),
        };
        ledger.append_entry(
            &alpha,
            closed("alpha", "2024-01-01 09:00:00", "2024-01-01 11:30:00"),
        );

        let value = serde_json::to_value(&ledger).unwrap();
        assert_eq!(value["active_project"], "alpha");
        assert_eq!(value["paused"], true);
        assert_eq!(
            value["projects"]["alpha"][0]["duration"],
            "2 hours 30 minutes"
        );
    }

    #[test]
    fn json_roundtrip_preserves_entry_order() {
        let mut ledger = Ledger::default();
        let beta = name("beta");
        let alpha = name("alpha");
        ledger.append_entry(
            &beta,
            closed("beta", "2024-01-02 08:00:00", "2024-01-02 08:30:00"),
        );
        ledger.append_entry(
            &beta,
            closed("beta", "2024-01-01 08:00:00", "2024-01-01 08:30:00"),
        );
        ledger.append_entry(
            &alpha,
            TimeEntry::open(alpha.clone(), Timestamp::parse("2024-01-03 09:00:00").unwrap()),
        );
        ledger.active = ActiveState::running(alpha);

        let json = serde_json::to_string_pretty(&ledger).unwrap();
        let parsed: Ledger = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, ledger);
    }

    #[test]
    fn missing_fields_default_to_idle_and_empty() {
        let parsed: Ledger = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, Ledger::default());
    }
}
