//! Storage layer for the project time log.
//!
//! Persists the [`Ledger`] as a single pretty-printed JSON file.
//!
//! # Atomicity
//!
//! Tracking status and entries live in one file, so they can never be written
//! out of step with each other. Every save writes a sibling temporary file and
//! renames it over the ledger; a crash mid-write leaves the previous ledger in
//! place rather than a truncated one.
//!
//! # Locking
//!
//! [`JsonFileStore::open`] takes an exclusive advisory lock on a sibling
//! `.lock` file and holds it until the store is dropped. A second process
//! opening the same ledger blocks until the first one exits. Within a single
//! process, open at most one store per ledger path at a time.
//!
//! # Corrupt Storage
//!
//! A ledger that cannot be read or parsed loads as empty (and is logged at
//! `warn`). The next successful save overwrites it.

pub mod legacy;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tl_core::{Ledger, LogStore, StoreError};

/// A [`LogStore`] backed by one JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    _lock: File,
}

impl JsonFileStore {
    /// Opens the ledger at `path`, creating parent directories as needed.
    ///
    /// The ledger file itself is created lazily on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let lock_path = lock_path(&path);
        let lock = File::create(&lock_path).map_err(|source| StoreError::Lock {
            path: lock_path.clone(),
            source,
        })?;
        lock.lock_exclusive().map_err(|source| StoreError::Lock {
            path: lock_path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened ledger");

        Ok(Self { path, _lock: lock })
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for JsonFileStore {
    fn load(&self) -> Ledger {
        read_ledger(&self.path)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(ledger)?;
        let tmp_path = sibling_path(&self.path, ".tmp");

        fs::write(&tmp_path, content).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

        if let Err(source) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::Io {
                path: self.path.clone(),
                source,
            });
        }

        tracing::debug!(
            path = %self.path.display(),
            entries = ledger.entry_count(),
            "saved ledger"
        );
        Ok(())
    }
}

/// Returns the path to the lock file guarding `ledger_path`.
fn lock_path(ledger_path: &Path) -> PathBuf {
    sibling_path(ledger_path, ".lock")
}

/// Appends `suffix` to the full file name, so the result never equals `path`.
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Reads a ledger file, treating anything unusable as empty.
fn read_ledger(path: &Path) -> Ledger {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no ledger yet, starting empty");
            return Ledger::default();
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "unreadable ledger, starting empty");
            return Ledger::default();
        }
    };

    match serde_json::from_str::<Ledger>(&content) {
        Ok(ledger) => ledger.normalized(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt ledger, starting empty");
            Ledger::default()
        }
    }
}
