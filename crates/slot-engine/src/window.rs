//! Bookable day windows derived from policy operating hours.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use crate::interval::Interval;
use crate::policy::SchedulingPolicy;
use crate::projection;

/// The bookable window for one calendar day, in the resource timezone.
///
/// `None` means the day is excluded outright (a weekend under a policy that
/// disallows weekends); the scanner skips excluded days without fetching busy
/// data. Operating hours were validated when the policy was resolved, so an
/// open day always yields a well-formed `[start, end)` window.
pub fn day_window(date: NaiveDate, policy: &SchedulingPolicy) -> Option<Interval> {
    if !policy.allow_weekends && is_weekend(date) {
        return None;
    }

    let start = at_hour(date, policy.operating_start_hour, policy)?;
    let end = at_hour(date, policy.operating_end_hour, policy)?;
    Interval::new(start, end).ok()
}

/// Local start-of-day bounds for a date, for whole-day busy fetches.
pub fn day_bounds(date: NaiveDate, policy: &SchedulingPolicy) -> Option<Interval> {
    let start = projection::local_midnight(date, policy.timezone);
    let end = projection::local_midnight(date.succ_opt()?, policy.timezone);
    Interval::new(start, end).ok()
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn at_hour(
    date: NaiveDate,
    hour: u32,
    policy: &SchedulingPolicy,
) -> Option<chrono::DateTime<chrono_tz::Tz>> {
    // Hour 24 closes at the next day's local midnight.
    if hour == 24 {
        return Some(projection::local_midnight(date.succ_opt()?, policy.timezone));
    }
    let local = NaiveDateTime::new(date, NaiveTime::from_hms_opt(hour, 0, 0)?);
    Some(projection::resolve_local(policy.timezone, local))
}
