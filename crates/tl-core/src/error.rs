//! Error types for tracking operations and storage.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::ProjectName;

/// What was wrong with a project's entry sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EntryProblem {
    /// Expected an open entry to close but the project has none at all.
    #[error("no time entries recorded")]
    NoEntries,

    /// Expected the last entry to be open but it already has an end time.
    #[error("last entry is already closed")]
    AlreadyClosed,

    /// Expected the last entry to be closed but it is still open.
    #[error("last entry is still open")]
    StillOpen,

    /// An open entry was included in a duration total.
    #[error("an open entry cannot be totalled")]
    OpenEntryInTotal,
}

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the ledger file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The ledger could not be serialized.
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The single-writer lock could not be taken.
    #[error("failed to lock {path}: {source}")]
    Lock {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by tracking operations.
///
/// Every variant is recoverable: the caller renders it as a message and the
/// persisted state is left exactly as it was before the operation.
#[derive(Debug, Error)]
pub enum TrackError {
    /// `begin` while a project is running or paused.
    #[error("{active} is already active. End it before beginning a new project.")]
    AlreadyActive { active: ProjectName },

    /// `stop`, `pause` or `resume` with nothing active.
    #[error("There is no active project currently running.")]
    NoActiveProject,

    /// `resume` while the active project is already running.
    #[error("{active} is running, not paused.")]
    NotPaused { active: ProjectName },

    /// A report was requested while a project is running.
    #[error("{active} is active. Pause or end the project to query the time log.")]
    ProjectActiveDuringQuery { active: ProjectName },

    /// The stored entries contradict the tracking state.
    #[error("time log for {project} is inconsistent: {problem}")]
    EntryInvariantViolation {
        project: ProjectName,
        problem: EntryProblem,
    },

    /// Persisting the ledger failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TrackError {
    pub(crate) const fn violation(project: ProjectName, problem: EntryProblem) -> Self {
        Self::EntryInvariantViolation { project, problem }
    }
}
