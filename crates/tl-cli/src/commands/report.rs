//! Day report commands.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use tl_core::time::parse_date;
use tl_core::{DayReport, LogStore, Timestamp, Tracker};

/// Shows the report for the day given as `YYYY-MM-DD`.
pub fn run<W: Write, S: LogStore>(
    writer: &mut W,
    tracker: &Tracker<S>,
    date: &str,
    json: bool,
) -> Result<()> {
    let date: NaiveDate = parse_date(date.trim())?;
    let report = tracker.report(date)?;
    write_report(writer, &report, json)
}

/// Shows the report for the day `now` falls on.
pub fn today<W: Write, S: LogStore>(
    writer: &mut W,
    tracker: &Tracker<S>,
    now: Timestamp,
    json: bool,
) -> Result<()> {
    let report = tracker.today(now)?;
    write_report(writer, &report, json)
}

fn write_report<W: Write>(writer: &mut W, report: &DayReport, json: bool) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(report)?)?;
        return Ok(());
    }

    writeln!(writer, "{}'s time logs:", report.date)?;
    if report.is_empty() {
        writeln!(writer, "No time logged.")?;
        return Ok(());
    }

    for project in &report.projects {
        writeln!(writer, "Project: {}", project.project)?;
        for entry in &project.entries {
            let end = entry.end_time.map(|t| t.to_string()).unwrap_or_default();
            let duration = entry.duration.map(|d| d.to_string()).unwrap_or_default();
            writeln!(writer, "  {} - {end}  {duration}", entry.begin_time)?;
        }
        writeln!(writer, "Total time for {}: {}", report.date, project.total)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use insta::assert_snapshot;
    use tl_core::{MemoryStore, ProjectName, TrackError};

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse(s).unwrap()
    }

    fn name(s: &str) -> ProjectName {
        ProjectName::new(s).unwrap()
    }

    /// Two projects on 2024-01-01, one carried over from the day before.
    fn tracker() -> Tracker<MemoryStore> {
        let mut tracker = Tracker::new(MemoryStore::default());
        let sessions = [
            ("beta", "2023-12-31 23:30:00", "2024-01-01 00:30:00"),
            ("beta", "2024-01-01 14:00:00", "2024-01-01 14:20:30"),
            ("alpha", "2024-01-01 09:00:00", "2024-01-01 10:30:00"),
            ("beta", "2024-01-01 15:00:00", "2024-01-01 15:10:00"),
        ];
        for (project, begin, end) in sessions {
            tracker.begin(name(project), ts(begin)).unwrap();
            tracker.stop(ts(end)).unwrap();
        }
        tracker
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_groups_by_project_in_name_order() {
        let tracker = tracker();

        let output = render(|w| run(w, &tracker, "2024-01-01", false));

        assert_snapshot!("day_report_two_projects", output);
    }

    #[test]
    fn entry_crossing_midnight_belongs_to_its_start_day() {
        let tracker = tracker();

        let output = render(|w| run(w, &tracker, "2023-12-31", false));

        assert_snapshot!("day_report_midnight_crossing", output);
    }

    #[test]
    fn empty_day_says_so() {
        let tracker = tracker();

        let output = render(|w| today(w, &tracker, ts("2024-02-01 12:00:00"), false));

        assert_snapshot!("day_report_empty", output);
    }

    #[test]
    fn json_report_lists_entries_and_totals() {
        let mut tracker = Tracker::new(MemoryStore::default());
        tracker.begin(name("alpha"), ts("2024-01-01 09:00:00")).unwrap();
        tracker.stop(ts("2024-01-01 09:40:00")).unwrap();

        let output = render(|w| today(w, &tracker, ts("2024-01-01 18:00:00"), true));

        assert_snapshot!("day_report_json", output);
    }

    #[test]
    fn report_while_running_is_refused() {
        let mut tracker = tracker();
        tracker.begin(name("alpha"), ts("2024-01-02 09:00:00")).unwrap();
        let mut buf = Vec::new();

        let err = run(&mut buf, &tracker, "2024-01-01", false).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<TrackError>(),
            Some(TrackError::ProjectActiveDuringQuery { .. })
        ));
        assert!(buf.is_empty());
    }

    #[test]
    fn report_while_paused_is_allowed() {
        let mut tracker = tracker();
        tracker.begin(name("alpha"), ts("2024-01-01 16:00:00")).unwrap();
        tracker.pause(ts("2024-01-01 16:30:00")).unwrap();

        let output = render(|w| run(w, &tracker, "2024-01-01", false));

        assert!(output.contains("Total time for 2024-01-01: 2 hours 0 minutes"));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let tracker = tracker();
        let mut buf = Vec::new();

        let err = run(&mut buf, &tracker, "01/01/2024", false).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid date: 01/01/2024 (expected YYYY-MM-DD)"
        );
    }
}
