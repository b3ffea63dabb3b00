//! Half-open time intervals and busy-period merging.
//!
//! Raw busy entries arrive from the calendar source as loosely-typed
//! `{start, end}` pairs -- exact timestamps or date-only (all-day) markers,
//! possibly overlapping, possibly malformed. This module normalizes them into
//! [`Interval`]s in the resource timezone and merges them into a canonical
//! sorted, non-overlapping set.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::projection;

/// A half-open time range `[start, end)` in the resource timezone.
///
/// Invariant: `start < end`, enforced by [`Interval::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl Interval {
    /// Build an interval, rejecting degenerate or inverted ranges.
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Result<Self> {
        if start >= end {
            return Err(EngineError::InvalidWindow(format!(
                "interval end {} is not after start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Interval { start, end })
    }

    /// Half-open overlap test: touching intervals do not overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A raw busy entry as reported by the busy source.
///
/// Each endpoint is either an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (all-day events). Anything else, a missing endpoint, or an end not after
/// the start drops the entry during normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawBusy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl RawBusy {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        RawBusy {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

/// One parsed endpoint: an exact instant, or a date-only marker that still
/// needs all-day interpretation.
enum Endpoint {
    Instant(DateTime<Tz>),
    Day(NaiveDate),
}

fn parse_endpoint(raw: &str, tz: Tz) -> Option<Endpoint> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(Endpoint::Instant(dt.with_timezone(&tz)));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(Endpoint::Day)
}

/// Normalize one raw entry to an interval in the resource timezone.
///
/// Date-only endpoints resolve to local start-of-day. All-day sources usually
/// report an exclusive end date already; a date-only pair that does not land
/// strictly after its start is widened to cover the full start day.
fn normalize_entry(raw: &RawBusy, tz: Tz) -> Option<Interval> {
    let start_ep = parse_endpoint(raw.start.as_deref()?, tz)?;
    let end_ep = parse_endpoint(raw.end.as_deref()?, tz)?;

    let (start, end) = match (start_ep, end_ep) {
        (Endpoint::Instant(s), Endpoint::Instant(e)) => (s, e),
        (Endpoint::Instant(s), Endpoint::Day(e)) => (s, projection::local_midnight(e, tz)),
        (Endpoint::Day(s), Endpoint::Instant(e)) => (projection::local_midnight(s, tz), e),
        (Endpoint::Day(s), Endpoint::Day(e)) => {
            let end_date = if e > s { e } else { s.succ_opt()? };
            (
                projection::local_midnight(s, tz),
                projection::local_midnight(end_date, tz),
            )
        }
    };

    Interval::new(start, end).ok()
}

/// Merge intervals into a sorted, non-overlapping set.
///
/// Sorts by `(start, end)`, then folds left: the running interval absorbs any
/// successor whose start is at or before its end (overlap or exact adjacency)
/// and is emitted once a strict gap appears. Idempotent: merging an
/// already-merged set returns it unchanged.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|iv| (iv.start, iv.end));

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        if let Some(last) = merged.last_mut() {
            if iv.start <= last.end {
                last.end = last.end.max(iv.end);
                continue;
            }
        }
        merged.push(iv);
    }

    merged
}

/// Normalize a batch of raw busy entries and merge the survivors.
///
/// Malformed entries are dropped, never fatal to the batch.
pub fn merge_busy(raw: &[RawBusy], tz: Tz) -> Vec<Interval> {
    let intervals: Vec<Interval> = raw.iter().filter_map(|r| normalize_entry(r, tz)).collect();
    merge_intervals(intervals)
}
