//! Integration tests for the `slots` CLI binary.
//!
//! Exercises the query and book subcommands through the actual binary with
//! file-backed fixtures and a pinned clock, including display projection,
//! conflict handling, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the policy fixture.
fn policies_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/policies.json")
}

/// Helper: path to the busy fixture.
fn busy_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/busy.json")
}

/// Helper: a `slots` command pre-wired to the fixtures.
fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.args(["--policies", policies_path(), "--busy", busy_path()]);
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Query subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn query_lists_open_slots_around_busy_period() {
    // Monday 2026-08-10, busy 09:00-09:30: the 09:00 start must be gone,
    // its neighbors intact.
    slots()
        .args([
            "query",
            "--resource",
            "dr-alvarez",
            "--date",
            "2026-08-10",
            "--days",
            "1",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resource_timezone\": \"Europe/Madrid\""))
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T08:00:00+02:00\""))
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T09:30:00+02:00\""))
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T09:00:00+02:00\"").not());
}

#[test]
fn query_excludes_slots_already_past() {
    slots()
        .args([
            "query",
            "--resource",
            "dr-alvarez",
            "--date",
            "2026-08-10",
            "--days",
            "1",
            "--now",
            "2026-08-10T09:15:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T09:30:00+02:00\""))
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T08:00:00+02:00\"").not())
        .stdout(predicate::str::contains("\"start\": \"2026-08-10T08:30:00+02:00\"").not());
}

#[test]
fn query_weekend_returns_no_slots() {
    // Saturday + Sunday under a weekday-only policy.
    slots()
        .args([
            "query",
            "--resource",
            "dr-alvarez",
            "--date",
            "2026-08-15",
            "--days",
            "2",
            "--now",
            "2026-08-14T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slots\": []"));
}

#[test]
fn query_weekend_allowed_for_weekend_policy() {
    slots()
        .args([
            "query",
            "--resource",
            "dr-okafor",
            "--date",
            "2026-08-15",
            "--days",
            "1",
            "--now",
            "2026-08-14T06:00:00+01:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"resource_timezone\": \"Europe/London\""))
        .stdout(predicate::str::contains("\"start\": \"2026-08-15T10:00:00+01:00\""));
}

#[test]
fn query_all_day_block_empties_the_day() {
    // 2026-08-11 is covered by a date-only busy entry.
    slots()
        .args([
            "query",
            "--resource",
            "dr-alvarez",
            "--date",
            "2026-08-11",
            "--days",
            "1",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"slots\": []"));
}

#[test]
fn query_projects_display_zone() {
    // Madrid 08:00 CEST renders as London 07:00 BST for the caller.
    slots()
        .args([
            "query",
            "--resource",
            "dr-alvarez",
            "--date",
            "2026-08-10",
            "--days",
            "1",
            "--caller-tz",
            "Europe/London",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"display_start\": \"2026-08-10T07:00:00+01:00\""));
}

#[test]
fn query_unknown_resource_fails() {
    slots()
        .args(["query", "--resource", "dr-nobody"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown_resource"));
}

#[test]
fn query_missing_policy_file_fails() {
    Command::cargo_bin("slots")
        .unwrap()
        .args([
            "--policies",
            "/nonexistent/policies.json",
            "--busy",
            busy_path(),
            "query",
            "--resource",
            "dr-alvarez",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("policy file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Book subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_free_slot_prints_reservation() {
    slots()
        .args([
            "book",
            "--resource",
            "dr-alvarez",
            "--start",
            "2026-08-10T10:00:00",
            "--duration",
            "30",
            "--attendee",
            "Ana Prieto",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reservation_id\": \"res-dr-alvarez-"))
        .stdout(predicate::str::contains("https://calendar.example/r/"));
}

#[test]
fn book_taken_slot_reports_conflict() {
    slots()
        .args([
            "book",
            "--resource",
            "dr-alvarez",
            "--start",
            "2026-08-10T09:00:00",
            "--duration",
            "30",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("\"outcome\":\"conflict\""));
}

#[test]
fn book_past_start_reports_conflict() {
    slots()
        .args([
            "book",
            "--resource",
            "dr-alvarez",
            "--start",
            "2026-08-10T08:00:00",
            "--duration",
            "30",
            "--now",
            "2026-08-10T09:15:00+02:00",
        ])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("conflict"));
}

#[test]
fn book_caller_zone_start_resolves_to_resource_zone() {
    // London 09:30 BST is Madrid 10:30 CEST; both renderings of the same
    // instant, so the booking succeeds even with the 09:00-09:30 Madrid busy
    // block nearby.
    slots()
        .args([
            "book",
            "--resource",
            "dr-alvarez",
            "--start",
            "2026-08-10T09:30:00",
            "--duration",
            "30",
            "--caller-tz",
            "Europe/London",
            "--now",
            "2026-08-10T06:00:00+02:00",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reservation_id\""));
}

#[test]
fn book_invalid_start_fails_with_invalid_date() {
    slots()
        .args([
            "book",
            "--resource",
            "dr-alvarez",
            "--start",
            "next tuesday",
            "--duration",
            "30",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid_date"));
}
