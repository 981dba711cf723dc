//! Import from the older two-file layout.
//!
//! The previous tool kept entries and tracking status in separate files:
//!
//! - an entry log, `{"<project>": [{"project_name", "begin_time", "end_time"?, "total_time"?}]}`
//! - a status record, `{"active_project": "<project>" | null, "pause": true | false | null}`
//!
//! Both are folded into a single [`Ledger`]. Either file may be missing or
//! corrupt, in which case it contributes nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tl_core::{ActiveState, Ledger, ProjectName, TimeEntry};

/// Status record of the older layout.
#[derive(Debug, Default, Deserialize)]
struct LegacyStatus {
    #[serde(default)]
    active_project: Option<String>,
    #[serde(default)]
    pause: Option<bool>,
}

/// Result of folding the legacy files into a ledger.
#[derive(Debug, Default)]
pub struct LegacyImport {
    pub ledger: Ledger,
    /// Projects whose entries could not be converted, with the reason.
    pub skipped: Vec<(String, String)>,
}

/// Reads the legacy entry log and optional status record.
pub fn import_legacy(log_path: &Path, status_path: Option<&Path>) -> LegacyImport {
    let mut import = LegacyImport::default();

    let projects: BTreeMap<String, Value> = read_json(log_path).unwrap_or_default();
    for (key, value) in projects {
        match convert_project(&key, value) {
            Ok((project, entries)) => import.ledger.replace_entries(&project, entries),
            Err(reason) => {
                tracing::warn!(project = %key, %reason, "skipping legacy project");
                import.skipped.push((key, reason));
            }
        }
    }

    let status: LegacyStatus = status_path.and_then(read_json).unwrap_or_default();
    let active_project = status
        .active_project
        .and_then(|name| ProjectName::new(name).ok());
    import.ledger.active = ActiveState {
        paused: active_project.is_some() && status.pause.unwrap_or(false),
        active_project,
    };

    tracing::info!(
        projects = import.ledger.projects.len(),
        entries = import.ledger.entry_count(),
        skipped = import.skipped.len(),
        "read legacy time log"
    );
    import
}

fn convert_project(key: &str, value: Value) -> Result<(ProjectName, Vec<TimeEntry>), String> {
    let project = ProjectName::new(key).map_err(|e| e.to_string())?;
    let entries: Vec<TimeEntry> = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Ok((project, entries))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "legacy file not readable");
            return None;
        }
    };
    match serde_json::from_str(&content) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "legacy file is corrupt");
            None
        }
    }
}
