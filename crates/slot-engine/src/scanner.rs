//! Multi-day availability scanning.

use chrono::{DateTime, Days, NaiveDate, Utc};
use tracing::debug;

use crate::error::{EngineError, Result};
use crate::filter::{self, CandidateSlot};
use crate::interval;
use crate::policy::SchedulingPolicy;
use crate::ports::BusySource;
use crate::window;

/// Upper bound on `days_to_check` accepted by the engine.
pub const MAX_SCAN_DAYS: u32 = 60;

/// Validated scan parameters, resolved from the request and policy.
#[derive(Debug, Clone, Copy)]
pub struct ScanParams {
    pub start_date: NaiveDate,
    pub days_to_check: u32,
    pub alignment_minutes: u32,
    pub required_free_minutes: u32,
    pub max_slots: usize,
}

/// Scan a bounded day range for bookable slots.
///
/// For each day: build the window (skipping excluded days without fetching),
/// fetch and merge busy data, then generate and filter candidates. Days are
/// fetched sequentially in offset order, so slots accumulate in `(date,
/// start)` order and the `max_slots` cutoff is reproducible; no busy data is
/// fetched for days past the cutoff. Cancelling the returned future aborts
/// only this scan.
pub async fn scan<S>(
    source: &S,
    resource_id: &str,
    policy: &SchedulingPolicy,
    params: &ScanParams,
    now: DateTime<Utc>,
) -> Result<Vec<CandidateSlot>>
where
    S: BusySource + ?Sized,
{
    let mut slots: Vec<CandidateSlot> = Vec::new();

    for offset in 0..params.days_to_check {
        let date = params
            .start_date
            .checked_add_days(Days::new(u64::from(offset)))
            .ok_or_else(|| {
                EngineError::InvalidDate(format!(
                    "day offset {offset} from {} overflows the calendar",
                    params.start_date
                ))
            })?;

        let Some(day) = window::day_window(date, policy) else {
            continue;
        };

        let raw = source.fetch_busy(resource_id, day.start, day.end).await?;
        let busy = interval::merge_busy(&raw, policy.timezone);

        let found = filter::filter_candidates(
            &day,
            &busy,
            params.alignment_minutes,
            params.required_free_minutes,
            now,
        );
        debug!(resource = resource_id, %date, found = found.len(), "scanned day");

        slots.extend(found);
        if slots.len() >= params.max_slots {
            slots.truncate(params.max_slots);
            break;
        }
    }

    Ok(slots)
}
