//! Booking conflict guard: last-moment re-validation of a chosen slot.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::error::{EngineError, Result};
use crate::filter;
use crate::interval::{self, Interval};
use crate::policy::SchedulingPolicy;
use crate::ports::BusySource;
use crate::window;

/// Re-validate a chosen interval against fresh busy data for its day.
///
/// Runs immediately before the reservation sink is called: re-fetches the
/// full target day, merges, and re-applies the availability filter to the
/// chosen interval alone. A conflict (or a start already at or before `now`)
/// fails with [`EngineError::SlotNoLongerAvailable`] and the sink is never
/// reached.
///
/// This narrows the quote-to-commit race window; it does not close it. True
/// de-duplication is the reservation sink's contract (see
/// [`crate::ports::ReservationSink`]).
pub async fn guard_slot<S>(
    source: &S,
    resource_id: &str,
    policy: &SchedulingPolicy,
    target: &Interval,
    now: DateTime<Utc>,
) -> Result<()>
where
    S: BusySource + ?Sized,
{
    if target.start.with_timezone(&Utc) <= now {
        return Err(EngineError::SlotNoLongerAvailable(format!(
            "start {} is not in the future",
            target.start.to_rfc3339()
        )));
    }

    let date = target.start.date_naive();
    let day = window::day_bounds(date, policy).ok_or_else(|| {
        EngineError::InvalidDate(format!("no day bounds for {date}"))
    })?;

    let raw = source.fetch_busy(resource_id, day.start, day.end).await?;
    let busy = interval::merge_busy(&raw, policy.timezone);

    if filter::conflicts_with(target, &busy) {
        warn!(
            resource = resource_id,
            start = %target.start.to_rfc3339(),
            "slot taken between quote and commit"
        );
        return Err(EngineError::SlotNoLongerAvailable(format!(
            "{} .. {} is no longer free",
            target.start.to_rfc3339(),
            target.end.to_rfc3339()
        )));
    }

    Ok(())
}
