//! Import command for the older two-file time log.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};

use tl_core::LogStore;
use tl_store::legacy::import_legacy;

/// Reads the legacy files and saves them as the ledger.
///
/// Refuses to replace a ledger that already holds entries or an active
/// project unless `force` is set.
pub fn run<W: Write, S: LogStore>(
    writer: &mut W,
    store: &mut S,
    log: &Path,
    status: Option<&Path>,
    force: bool,
) -> Result<()> {
    let existing = store.load();
    if !existing.is_empty() && !force {
        bail!(
            "ledger already holds {} entries; pass --force to replace it",
            existing.entry_count()
        );
    }

    let import = import_legacy(log, status);
    store.save(&import.ledger)?;

    writeln!(
        writer,
        "Imported {} entries across {} projects",
        import.ledger.entry_count(),
        import.ledger.projects.len()
    )?;
    for (project, reason) in &import.skipped {
        writeln!(writer, "Skipped {project}: {reason}")?;
    }
    if let Some(active) = &import.ledger.active.active_project {
        let state = if import.ledger.active.paused {
            "paused"
        } else {
            "running"
        };
        writeln!(writer, "Active project: {active} ({state})")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use insta::assert_snapshot;
    use tl_core::{ActiveState, MemoryStore, ProjectName, TimeEntry, Timestamp};

    const LOG: &str = r#"{
  "alpha": [
    {
      "project_name": "alpha",
      "begin_time": "2024-01-01 09:00:00",
      "end_time": "2024-01-01 10:00:00",
      "total_time": "1 hours 0 minutes"
    }
  ],
  "beta": [
    {
      "project_name": "beta",
      "begin_time": "2024-01-02 09:00:00",
      "end_time": "2024-01-02 09:15:00",
      "total_time": "0 hours 15 minutes"
    }
  ]
}"#;

    fn name(s: &str) -> ProjectName {
        ProjectName::new(s).unwrap()
    }

    #[test]
    fn import_saves_legacy_entries_and_status() {
        let temp = tempfile::tempdir().unwrap();
        let log = temp.path().join("time_log.json");
        let status = temp.path().join("status_data.json");
        fs::write(&log, LOG).unwrap();
        fs::write(&status, r#"{"active_project": "beta", "pause": true}"#).unwrap();
        let mut store = MemoryStore::default();

        let mut output = Vec::new();
        run(&mut output, &mut store, &log, Some(&status), false).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_snapshot!("import_with_paused_project", output);
        assert_eq!(store.ledger().active, ActiveState::paused(name("beta")));
        assert_eq!(store.load_entries(&name("alpha")).len(), 1);
    }

    #[test]
    fn import_refuses_to_replace_existing_entries() {
        let temp = tempfile::tempdir().unwrap();
        let log = temp.path().join("time_log.json");
        fs::write(&log, LOG).unwrap();
        let mut store = MemoryStore::default();
        store
            .append_entry(
                &name("gamma"),
                TimeEntry::open(name("gamma"), Timestamp::parse("2024-03-01 09:00:00").unwrap()),
            )
            .unwrap();

        let mut output = Vec::new();
        let err = run(&mut output, &mut store, &log, None, false).unwrap_err();

        assert_eq!(
            err.to_string(),
            "ledger already holds 1 entries; pass --force to replace it"
        );
        assert_eq!(store.save_count(), 1);

        run(&mut output, &mut store, &log, None, true).unwrap();
        assert!(store.load_entries(&name("gamma")).is_empty());
        assert_eq!(store.ledger().entry_count(), 2);
    }
}
