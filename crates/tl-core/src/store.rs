//! The log store seam between the tracker and durable storage.

use std::collections::BTreeMap;

use crate::entry::TimeEntry;
use crate::error::StoreError;
use crate::ledger::Ledger;
use crate::types::ProjectName;

/// Durable storage for the ledger.
///
/// Implementations hold no policy: they read and write whole ledgers. Loading
/// never fails the caller; missing or unreadable storage is an empty ledger.
pub trait LogStore {
    /// Loads the current ledger, or an empty one if there is nothing usable.
    fn load(&self) -> Ledger;

    /// Replaces the stored ledger with `ledger`.
    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError>;

    /// Every project's entries.
    fn load_all(&self) -> BTreeMap<ProjectName, Vec<TimeEntry>> {
        self.load().projects
    }

    /// One project's entries, empty if the project is unknown.
    fn load_entries(&self, project: &ProjectName) -> Vec<TimeEntry> {
        self.load().entries(project).to_vec()
    }

    /// Appends an entry to a project and persists the whole ledger.
    fn append_entry(&mut self, project: &ProjectName, entry: TimeEntry) -> Result<(), StoreError> {
        let mut ledger = self.load();
        ledger.append_entry(project, entry);
        self.save(&ledger)
    }

    /// Overwrites a project's entries and persists the whole ledger.
    fn replace_entries(
        &mut self,
        project: &ProjectName,
        entries: Vec<TimeEntry>,
    ) -> Result<(), StoreError> {
        let mut ledger = self.load();
        ledger.replace_entries(project, entries);
        self.save(&ledger)
    }
}

/// An in-process store.
///
/// Useful for testing and for callers that keep no files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    ledger: Ledger,
    saves: usize,
}

impl MemoryStore {
    /// Creates a store holding `ledger`.
    pub const fn new(ledger: Ledger) -> Self {
        Self { ledger, saves: 0 }
    }

    /// The stored ledger.
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// How many times [`LogStore::save`] has been called.
    pub const fn save_count(&self) -> usize {
        self.saves
    }
}

impl LogStore for MemoryStore {
    fn load(&self) -> Ledger {
        self.ledger.clone()
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        self.ledger = ledger.clone();
        self.saves += 1;
        Ok(())
    }
}
