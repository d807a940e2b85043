#![cfg(feature = "cli_api")]

use assert_cmd::Command;
use predicates::str::contains as str_contains;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

const SCHEDULE_CSV: &str = "Start,End,Group,Type,Subject,Code,Kind,Teacher,Notes,Id,Room\n\
                            24.03.2025 09:00,24.03.2025 10:30,,,Databases,,Lecture,,,,A1\n\
                            25.03.2025 09:00,25.03.2025 10:30,,,,,,,,,\n";

#[allow(deprecated)]
fn run_cli(script: &str) -> assert_cmd::assert::Assert {
    let mut cmd = Command::cargo_bin("cli").expect("cli binary");
    cmd.write_stdin(script.to_string()).assert()
}

fn schedule_file() -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(SCHEDULE_CSV.as_bytes()).unwrap();
    file
}

#[test]
fn cli_load_reports_counts_and_table() {
    let file = schedule_file();
    let script = format!("load {}\nquit\n", file.path().display());
    run_cli(&script)
        .success()
        .stdout(str_contains("rows=2, events=1, skipped=1"))
        .stdout(str_contains("Databases"));
}

#[test]
fn cli_lists_skipped_rows() {
    let file = schedule_file();
    let script = format!("load {}\nskipped\nquit\n", file.path().display());
    run_cli(&script)
        .success()
        .stdout(str_contains("row 2 (sheet row 3): missing summary"));
}

#[test]
fn cli_save_writes_calendar_file() {
    let file = schedule_file();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out.ics");
    let script = format!(
        "load {}\nsave {}\nquit\n",
        file.path().display(),
        out.display()
    );
    run_cli(&script).success().stdout(str_contains("Calendar saved to"));

    let ics = std::fs::read_to_string(&out).unwrap();
    assert!(ics.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\nCALSCALE:GREGORIAN\n"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
    assert!(ics.contains("DTSTART:20250324T090000"));
    assert!(ics.ends_with("END:VCALENDAR"));
}

#[test]
fn cli_reports_unreadable_input_and_keeps_running() {
    run_cli("load /nonexistent/schedule.xlsx\nlayout show\nquit\n")
        .success()
        .stdout(str_contains("Error:"))
        .stdout(str_contains("Column layout      : start=A"));
}

#[test]
fn cli_layout_col_changes_summary_column() {
    let file = schedule_file();
    let script = format!(
        "layout col summary D\nload {}\nquit\n",
        file.path().display()
    );
    run_cli(&script)
        .success()
        .stdout(str_contains("Column for summary updated."))
        .stdout(str_contains("events=0, skipped=2"));
}

#[test]
fn cli_requires_conversion_before_preview() {
    run_cli("preview\nquit\n")
        .success()
        .stdout(str_contains("Nothing converted yet."));
}
