//! Core domain logic for the project time log.
//!
//! This crate contains the fundamental types and logic for:
//! - Entries: open and closed work intervals per project
//! - The tracking state machine: begin, pause, resume and stop
//! - Duration aggregation and day reports
//! - The [`LogStore`] seam used to persist the ledger

mod duration;
mod entry;
mod error;
mod ledger;
pub mod machine;
mod report;
mod store;
pub mod time;
mod tracker;
mod types;

pub use duration::{WorkDuration, aggregate, elapsed_seconds};
pub use entry::TimeEntry;
pub use error::{EntryProblem, StoreError, TrackError};
pub use ledger::{ActiveState, Ledger, TrackingState};
pub use machine::{Outcome, Transition};
pub use report::{DayReport, ProjectReport};
pub use store::{LogStore, MemoryStore};
pub use time::Timestamp;
pub use tracker::Tracker;
pub use types::{ProjectName, ValidationError};
