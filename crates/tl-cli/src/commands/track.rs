//! Begin, pause/resume and end commands.

use std::io::Write;

use anyhow::Result;

use tl_core::{LogStore, Outcome, ProjectName, TimeEntry, Timestamp, Tracker};

/// Starts timing `project`.
pub fn begin<W: Write, S: LogStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    project: &str,
    now: Timestamp,
) -> Result<()> {
    let project = ProjectName::new(project.trim())?;
    let outcome = tracker.begin(project, now)?;
    write_outcome(writer, &outcome)
}

/// Pauses the running project, or resumes the paused one.
pub fn pause<W: Write, S: LogStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    now: Timestamp,
) -> Result<()> {
    let outcome = tracker.pause_or_resume(now)?;
    write_outcome(writer, &outcome)
}

/// Stops timing the active project.
pub fn end<W: Write, S: LogStore>(
    writer: &mut W,
    tracker: &mut Tracker<S>,
    now: Timestamp,
) -> Result<()> {
    let outcome = tracker.stop(now)?;
    write_outcome(writer, &outcome)
}

fn write_outcome<W: Write>(writer: &mut W, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Began { entry } => writeln!(
            writer,
            "Time logging started for project: {} at {}",
            entry.project_name, entry.begin_time
        )?,
        Outcome::Resumed { entry } => writeln!(
            writer,
            "Time logging resumed for project: {} at {}",
            entry.project_name, entry.begin_time
        )?,
        Outcome::Paused { entry } => {
            write_closed(writer, "paused", entry)?;
        }
        Outcome::Stopped { entry } => {
            write_closed(writer, "stopped", entry)?;
        }
        Outcome::StoppedWhilePaused {
            project,
            last_entry,
        } => {
            match last_entry.as_ref().and_then(|entry| entry.end_time) {
                Some(end) => writeln!(
                    writer,
                    "Time logging stopped for project: {project} at {end}"
                )?,
                None => writeln!(writer, "Time logging stopped for project: {project}")?,
            }
            writeln!(writer, "{project} was paused, so no further time was logged.")?;
        }
    }
    Ok(())
}

fn write_closed<W: Write>(writer: &mut W, verb: &str, entry: &TimeEntry) -> Result<()> {
    if let Some(end) = entry.end_time {
        writeln!(
            writer,
            "Time logging {verb} for project: {} at {end}",
            entry.project_name
        )?;
    }
    if let Some(duration) = entry.duration {
        writeln!(
            writer,
            "Total time logged for {}: {duration}",
            entry.project_name
        )?;
    }
    Ok(())
}
