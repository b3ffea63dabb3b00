//! Timezone projection between the resource's canonical zone and a caller's
//! display zone.
//!
//! Two pure operations: re-express a canonical slot's instants in a caller
//! timezone (the instants themselves never move), and reverse a caller's
//! chosen local start back into the canonical booking range. Also home to the
//! DST resolution rules every local wall-clock value in the engine goes
//! through.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{EngineError, Result};
use crate::interval::Interval;

/// Parse an IANA timezone identifier.
pub fn parse_tz(name: &str) -> Result<Tz> {
    name.parse()
        .map_err(|_| EngineError::InvalidTimezone(name.to_string()))
}

/// Resolve a naive local wall-clock value in `tz`.
///
/// Ambiguous times (DST fall-back) take the earliest mapping. Nonexistent
/// times (spring-forward gap) shift forward to the first valid instant after
/// the gap, probing in 30-minute steps. The UTC fallback at the end is
/// unreachable with real tzdata; it guards against pathological zone tables.
pub fn resolve_local(tz: Tz, local: NaiveDateTime) -> DateTime<Tz> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => return dt,
        LocalResult::Ambiguous(earliest, _) => return earliest,
        LocalResult::None => {}
    }

    let mut probe = local;
    for _ in 0..8 {
        probe += Duration::minutes(30);
        match tz.from_local_datetime(&probe) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => continue,
        }
    }

    tz.from_utc_datetime(&local)
}

/// Local start-of-day for a date in `tz`, DST-resolved.
pub fn local_midnight(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    resolve_local(tz, NaiveDateTime::new(date, chrono::NaiveTime::MIN))
}

/// Re-express a canonical interval's instants in a display zone.
///
/// The underlying instants are unchanged; only their zone-relative rendering
/// differs, so reversing the displayed value reproduces the canonical
/// interval exactly.
pub fn project(interval: &Interval, zone: Tz) -> (DateTime<Tz>, DateTime<Tz>) {
    (
        interval.start.with_timezone(&zone),
        interval.end.with_timezone(&zone),
    )
}

/// Resolve a caller-chosen start into the canonical booking range.
///
/// `chosen_start` is either already zone-qualified (RFC 3339 with offset) or
/// a naive local wall-clock value, disambiguated in the caller's declared
/// zone and falling back to the resource zone when none was given. The
/// result is `[start, start + duration)` in the resource timezone.
pub fn resolve_selection(
    chosen_start: &str,
    duration_minutes: u32,
    caller_tz: Option<Tz>,
    resource_tz: Tz,
) -> Result<Interval> {
    if duration_minutes == 0 {
        return Err(EngineError::InvalidWindow(
            "duration_minutes must be positive".to_string(),
        ));
    }

    let start = match DateTime::parse_from_rfc3339(chosen_start) {
        Ok(dt) => dt.with_timezone(&resource_tz),
        Err(_) => {
            let naive = parse_naive(chosen_start)?;
            resolve_local(caller_tz.unwrap_or(resource_tz), naive).with_timezone(&resource_tz)
        }
    };

    Interval::new(start, start + Duration::minutes(i64::from(duration_minutes)))
}

fn parse_naive(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| EngineError::InvalidDate(raw.to_string()))
}
