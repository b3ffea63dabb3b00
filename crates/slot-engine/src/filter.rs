//! Availability filtering of candidate starts against busy data.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::candidates;
use crate::interval::Interval;

/// A bookable slot that survived the availability filter.
///
/// Invariants: `end - start` equals the required free minutes it was
/// generated with, and `start` sits on the alignment grid of its window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlot {
    /// Calendar day in the resource timezone.
    pub date: NaiveDate,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl CandidateSlot {
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start,
            end: self.end,
        }
    }
}

/// Whether a candidate interval collides with any merged busy interval.
///
/// Half-open rule throughout: a candidate that starts exactly where a busy
/// period ends (or vice versa) is free. Short-circuits on the first hit.
pub fn conflicts_with(candidate: &Interval, busy: &[Interval]) -> bool {
    busy.iter().any(|b| candidate.overlaps(b))
}

/// Generate and filter candidates for one day window.
///
/// Rejects candidates that overlap busy data or whose start is at or before
/// `now`. Survivors come out in chronological order by construction.
pub fn filter_candidates(
    window: &Interval,
    busy: &[Interval],
    alignment_minutes: u32,
    required_free_minutes: u32,
    now: DateTime<Utc>,
) -> Vec<CandidateSlot> {
    let need = Duration::minutes(i64::from(required_free_minutes));

    candidates::candidate_starts(window, alignment_minutes, required_free_minutes)
        .filter(|start| start.with_timezone(&Utc) > now)
        .map(|start| CandidateSlot {
            date: start.date_naive(),
            start,
            end: start + need,
        })
        .filter(|slot| !conflicts_with(&slot.interval(), busy))
        .collect()
}
