//! Day-scoped reports grouped by project.

use chrono::NaiveDate;
use serde::Serialize;

use crate::duration::{WorkDuration, aggregate};
use crate::entry::TimeEntry;
use crate::error::TrackError;
use crate::ledger::Ledger;
use crate::types::ProjectName;

/// One project's entries for the reported day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub project: ProjectName,
    pub entries: Vec<TimeEntry>,
    pub total: WorkDuration,
}

/// Entries that began on a given calendar day, grouped by project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub date: NaiveDate,
    pub projects: Vec<ProjectReport>,
}

impl DayReport {
    /// Selects every entry whose `begin_time` falls on `date`.
    ///
    /// Matching compares the calendar date of the timestamp, so an entry that
    /// starts before midnight and ends after it belongs to the day it started.
    /// Projects with nothing on that day are left out.
    pub fn build(ledger: &Ledger, date: NaiveDate) -> Result<Self, TrackError> {
        let mut projects = Vec::new();
        for (project, entries) in &ledger.projects {
            let selected: Vec<TimeEntry> = entries
                .iter()
                .filter(|entry| entry.begin_time.date() == date)
                .cloned()
                .collect();
            if selected.is_empty() {
                continue;
            }
            let total = aggregate(&selected)
                .map_err(|problem| TrackError::violation(project.clone(), problem))?;
            projects.push(ProjectReport {
                project: project.clone(),
                entries: selected,
                total,
            });
        }
        Ok(Self { date, projects })
    }

    /// True when no project has entries on the day.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
