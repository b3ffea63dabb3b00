//! Tests for timezone display projection, selection reversal, and DST
//! resolution of naive local times.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use slot_engine::interval::Interval;
use slot_engine::projection::{project, resolve_local, resolve_selection};
use slot_engine::EngineError;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn madrid() -> Tz {
    "Europe/Madrid".parse().unwrap()
}

fn zone(name: &str) -> Tz {
    name.parse().unwrap()
}

fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn canonical_slot() -> Interval {
    let tz = madrid();
    Interval::new(
        tz.with_ymd_and_hms(2026, 8, 10, 14, 0, 0).unwrap(),
        tz.with_ymd_and_hms(2026, 8, 10, 14, 30, 0).unwrap(),
    )
    .unwrap()
}

// ── Display projection ──────────────────────────────────────────────────────

#[test]
fn projection_changes_rendering_not_instant() {
    let slot = canonical_slot();
    let (start, end) = project(&slot, zone("Europe/London"));

    // Same instants, different wall clock.
    assert_eq!(start, slot.start);
    assert_eq!(end, slot.end);
    assert_eq!(start.to_rfc3339(), "2026-08-10T13:00:00+01:00");
    assert_eq!(end.to_rfc3339(), "2026-08-10T13:30:00+01:00");
}

#[test]
fn projection_round_trips_through_any_display_zone() {
    let slot = canonical_slot();
    for name in [
        "UTC",
        "Europe/London",
        "America/New_York",
        "Asia/Tokyo",
        "Asia/Kolkata",
        "Pacific/Auckland",
    ] {
        let display_zone = zone(name);
        let (display_start, _) = project(&slot, display_zone);

        // A caller accepting the displayed slot sends its zone-qualified
        // rendering back; reversal must reproduce the canonical interval.
        let reversed = resolve_selection(
            &display_start.to_rfc3339(),
            30,
            Some(display_zone),
            madrid(),
        )
        .unwrap();
        assert_eq!(reversed, slot, "round trip failed via {name}");
    }
}

// ── Selection reversal ──────────────────────────────────────────────────────

#[test]
fn naive_start_uses_caller_zone() {
    // New York 08:00 EDT is Madrid 14:00 CEST.
    let reversed = resolve_selection(
        "2026-08-10T08:00:00",
        30,
        Some(zone("America/New_York")),
        madrid(),
    )
    .unwrap();
    assert_eq!(reversed, canonical_slot());
}

#[test]
fn naive_start_falls_back_to_resource_zone() {
    let reversed = resolve_selection("2026-08-10T14:00:00", 30, None, madrid()).unwrap();
    assert_eq!(reversed, canonical_slot());
}

#[test]
fn minute_precision_input_is_accepted() {
    let reversed = resolve_selection("2026-08-10T14:00", 30, None, madrid()).unwrap();
    assert_eq!(reversed, canonical_slot());
}

#[test]
fn unparsable_start_is_invalid_date() {
    let err = resolve_selection("next tuesday", 30, None, madrid()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDate(_)));
}

#[test]
fn zero_duration_is_invalid_window() {
    let err = resolve_selection("2026-08-10T14:00:00", 0, None, madrid()).unwrap_err();
    assert!(matches!(err, EngineError::InvalidWindow(_)));
}

// ── DST resolution ──────────────────────────────────────────────────────────

#[test]
fn ambiguous_fall_back_time_takes_earliest_mapping() {
    // Madrid repeats 02:00-03:00 on 2026-10-25; the first pass is still CEST.
    let resolved = resolve_local(madrid(), local(2026, 10, 25, 2, 30));
    assert_eq!(resolved.to_rfc3339(), "2026-10-25T02:30:00+02:00");
}

#[test]
fn nonexistent_spring_forward_time_shifts_to_after_the_gap() {
    // Madrid skips 02:00-03:00 on 2026-03-29.
    let resolved = resolve_local(madrid(), local(2026, 3, 29, 2, 30));
    assert_eq!(resolved.to_rfc3339(), "2026-03-29T03:00:00+02:00");
}

#[test]
fn unambiguous_time_resolves_directly() {
    let resolved = resolve_local(madrid(), local(2026, 8, 10, 14, 0));
    assert_eq!(resolved.to_rfc3339(), "2026-08-10T14:00:00+02:00");
}
