//! The tracking state machine.
//!
//! Transitions are pure: they take a ledger snapshot and the current time and
//! return the next ledger plus an [`Outcome`]. Nothing here touches storage, so
//! a rejected transition leaves the caller's snapshot untouched by construction.
//!
//! | from      | begin          | pause         | resume        | stop              |
//! |-----------|----------------|---------------|---------------|-------------------|
//! | `Idle`    | `Running`      | error         | error         | error             |
//! | `Running` | error          | `Paused`      | error         | `Idle`            |
//! | `Paused`  | error          | `Running`     | `Running`     | `Idle` (no close) |

use chrono::NaiveDate;

use crate::entry::TimeEntry;
use crate::error::{EntryProblem, TrackError};
use crate::ledger::{ActiveState, Ledger, TrackingState};
use crate::report::DayReport;
use crate::time::Timestamp;
use crate::types::ProjectName;

/// A state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Start timing a project.
    Begin(ProjectName),
    /// Suspend timing of the active project; resumes if already paused.
    Pause,
    /// Continue timing a paused project.
    Resume,
    /// Pause when running, resume when paused.
    TogglePause,
    /// End the tracking session.
    Stop,
}

/// What a successful transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new open entry was created.
    Began { entry: TimeEntry },
    /// The open entry was closed and the project is paused.
    Paused { entry: TimeEntry },
    /// A new open entry was created for the paused project.
    Resumed { entry: TimeEntry },
    /// The open entry was closed and tracking ended.
    Stopped { entry: TimeEntry },
    /// Tracking ended while paused; the last entry was already closed and is unchanged.
    StoppedWhilePaused {
        project: ProjectName,
        last_entry: Option<TimeEntry>,
    },
}

impl Outcome {
    /// The project the transition acted on.
    pub const fn project(&self) -> &ProjectName {
        match self {
            Self::Began { entry }
            | Self::Paused { entry }
            | Self::Resumed { entry }
            | Self::Stopped { entry } => &entry.project_name,
            Self::StoppedWhilePaused { project, .. } => project,
        }
    }
}

/// Applies a transition to a ledger snapshot.
pub fn apply(
    ledger: &Ledger,
    transition: Transition,
    now: Timestamp,
) -> Result<(Ledger, Outcome), TrackError> {
    let mut next = ledger.clone();
    let state = next.state();
    tracing::debug!(?state, ?transition, %now, "applying transition");

    let outcome = match transition {
        Transition::Begin(project) => begin(&mut next, state, project, now)?,
        Transition::Pause => pause(&mut next, state, now)?,
        Transition::Resume => resume(&mut next, state, now)?,
        Transition::TogglePause => match state {
            TrackingState::Paused(_) => resume(&mut next, state, now)?,
            _ => pause(&mut next, state, now)?,
        },
        Transition::Stop => stop(&mut next, state, now)?,
    };

    Ok((next, outcome))
}

/// Builds the report for `date`, refusing while a project is running.
pub fn report(ledger: &Ledger, date: NaiveDate) -> Result<DayReport, TrackError> {
    if let TrackingState::Running(active) = ledger.state() {
        return Err(TrackError::ProjectActiveDuringQuery { active });
    }
    DayReport::build(ledger, date)
}

fn begin(
    ledger: &mut Ledger,
    state: TrackingState,
    project: ProjectName,
    now: Timestamp,
) -> Result<Outcome, TrackError> {
    match state {
        TrackingState::Running(active) | TrackingState::Paused(active) => {
            Err(TrackError::AlreadyActive { active })
        }
        TrackingState::Idle => {
            let entry = open_entry(ledger, &project, now)?;
            ledger.active = ActiveState::running(project);
            Ok(Outcome::Began { entry })
        }
    }
}

fn pause(
    ledger: &mut Ledger,
    state: TrackingState,
    now: Timestamp,
) -> Result<Outcome, TrackError> {
    match state {
        TrackingState::Idle => Err(TrackError::NoActiveProject),
        TrackingState::Paused(_) => resume(ledger, state, now),
        TrackingState::Running(active) => {
            let entry = close_entry(ledger, &active, now)?;
            ledger.active = ActiveState::paused(active);
            Ok(Outcome::Paused { entry })
        }
    }
}

fn resume(
    ledger: &mut Ledger,
    state: TrackingState,
    now: Timestamp,
) -> Result<Outcome, TrackError> {
    match state {
        TrackingState::Idle => Err(TrackError::NoActiveProject),
        TrackingState::Running(active) => Err(TrackError::NotPaused { active }),
        TrackingState::Paused(active) => {
            let entry = open_entry(ledger, &active, now)?;
            ledger.active = ActiveState::running(active);
            Ok(Outcome::Resumed { entry })
        }
    }
}

fn stop(
    ledger: &mut Ledger,
    state: TrackingState,
    now: Timestamp,
) -> Result<Outcome, TrackError> {
    match state {
        TrackingState::Idle => Err(TrackError::NoActiveProject),
        TrackingState::Running(active) => {
            let entry = close_entry(ledger, &active, now)?;
            ledger.active = ActiveState::default();
            Ok(Outcome::Stopped { entry })
        }
        TrackingState::Paused(active) => {
            let last_entry = ledger.last_entry(&active).cloned();
            if last_entry.as_ref().is_some_and(TimeEntry::is_open) {
                return Err(TrackError::violation(active, EntryProblem::StillOpen));
            }
            ledger.active = ActiveState::default();
            Ok(Outcome::StoppedWhilePaused {
                project: active,
                last_entry,
            })
        }
    }
}

/// Appends a new open entry, refusing to leave two open entries behind.
fn open_entry(
    ledger: &mut Ledger,
    project: &ProjectName,
    now: Timestamp,
) -> Result<TimeEntry, TrackError> {
    if ledger.last_entry(project).is_some_and(TimeEntry::is_open) {
        return Err(TrackError::violation(
            project.clone(),
            EntryProblem::StillOpen,
        ));
    }
    let entry = TimeEntry::open(project.clone(), now);
    ledger.append_entry(project, entry.clone());
    Ok(entry)
}

/// Closes the project's last entry, which must be open.
fn close_entry(
    ledger: &mut Ledger,
    project: &ProjectName,
    now: Timestamp,
) -> Result<TimeEntry, TrackError> {
    let entry = ledger
        .last_entry_mut(project)
        .ok_or_else(|| TrackError::violation(project.clone(), EntryProblem::NoEntries))?;
    entry
        .close(now)
        .map_err(|problem| TrackError::violation(project.clone(), problem))?;
    Ok(entry.clone())
}
