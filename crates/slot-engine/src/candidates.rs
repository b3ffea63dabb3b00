//! Grid-aligned candidate start generation.

use std::iter;

use chrono::{DateTime, Duration, Timelike};
use chrono_tz::Tz;

use crate::interval::Interval;

/// Lazy, finite sequence of candidate start instants inside a window.
///
/// The first candidate is the window start rounded up to the next wall-clock
/// multiple of `alignment_minutes` (a no-op when already aligned); each
/// subsequent candidate advances by the grid step. Generation stops once a
/// candidate plus `required_free_minutes` would spill past the window end.
/// The step is the grid, not the slot duration, so slots may overlap when
/// the grid is finer than the required duration.
///
/// `alignment_minutes` must be positive; the policy and request boundaries
/// both enforce that before this is reached.
pub fn candidate_starts(
    window: &Interval,
    alignment_minutes: u32,
    required_free_minutes: u32,
) -> impl Iterator<Item = DateTime<Tz>> {
    let step = Duration::minutes(i64::from(alignment_minutes));
    let need = Duration::minutes(i64::from(required_free_minutes));
    let end = window.end;
    let first = align_up(window.start, alignment_minutes);

    iter::successors(Some(first), move |c| Some(*c + step)).take_while(move |c| *c + need <= end)
}

/// Round a window start up to the next wall-clock grid multiple, measured in
/// minutes since local midnight.
fn align_up(start: DateTime<Tz>, alignment_minutes: u32) -> DateTime<Tz> {
    let minute_of_day = start.hour() * 60 + start.minute();
    let rem = minute_of_day % alignment_minutes;
    if rem == 0 {
        start
    } else {
        start + Duration::minutes(i64::from(alignment_minutes - rem))
    }
}
