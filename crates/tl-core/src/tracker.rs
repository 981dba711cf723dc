//! Drives the state machine against a [`LogStore`].
//!
//! Each call loads a fresh ledger, applies one transition, and saves the result
//! only if the transition succeeded. Loaded ledgers are normalized here, so the
//! `paused` flag never outlives its project whichever store is behind it.

use chrono::NaiveDate;

use crate::error::TrackError;
use crate::ledger::{ActiveState, Ledger};
use crate::machine::{self, Outcome, Transition};
use crate::report::DayReport;
use crate::store::LogStore;
use crate::time::Timestamp;
use crate::types::ProjectName;

/// Caller-facing tracking operations over a store.
#[derive(Debug)]
pub struct Tracker<S> {
    store: S,
}

impl<S: LogStore> Tracker<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Starts timing `project`.
    pub fn begin(&mut self, project: ProjectName, now: Timestamp) -> Result<Outcome, TrackError> {
        self.run(Transition::Begin(project), now)
    }

    /// Pauses the active project, or resumes it if already paused.
    pub fn pause(&mut self, now: Timestamp) -> Result<Outcome, TrackError> {
        self.run(Transition::Pause, now)
    }

    /// Resumes the paused project.
    pub fn resume(&mut self, now: Timestamp) -> Result<Outcome, TrackError> {
        self.run(Transition::Resume, now)
    }

    /// Toggles between running and paused.
    pub fn pause_or_resume(&mut self, now: Timestamp) -> Result<Outcome, TrackError> {
        self.run(Transition::TogglePause, now)
    }

    /// Ends the tracking session.
    pub fn stop(&mut self, now: Timestamp) -> Result<Outcome, TrackError> {
        self.run(Transition::Stop, now)
    }

    /// The current tracking status. Never fails.
    pub fn status(&self) -> ActiveState {
        self.load().active
    }

    /// Entries that began on `date`, grouped by project.
    pub fn report(&self, date: NaiveDate) -> Result<DayReport, TrackError> {
        machine::report(&self.load(), date)
    }

    /// The report for the day `now` falls on.
    pub fn today(&self, now: Timestamp) -> Result<DayReport, TrackError> {
        self.report(now.date())
    }

    fn load(&self) -> Ledger {
        self.store.load().normalized()
    }

    fn run(&mut self, transition: Transition, now: Timestamp) -> Result<Outcome, TrackError> {
        let ledger = self.load();
        let (next, outcome) = machine::apply(&ledger, transition, now)?;
        self.store.save(&next)?;
        tracing::info!(
            project = %outcome.project(),
            paused = next.active.paused,
            "transition committed"
        );
        Ok(outcome)
    }
}
