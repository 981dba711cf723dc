//! Status command for showing the active project.

use std::io::Write;

use anyhow::Result;

use tl_core::{LogStore, Tracker};

pub fn run<W: Write, S: LogStore>(writer: &mut W, tracker: &Tracker<S>) -> Result<()> {
    let status = tracker.status();
    let project = status
        .active_project
        .as_ref()
        .map_or("none", |project| project.as_str());

    writeln!(writer, "Project: {project} - Paused: {}", status.paused)?;
    Ok(())
}
