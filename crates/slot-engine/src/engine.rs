//! The dependency-injected engine façade.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use tracing::{debug, info};

use crate::api::{
    AvailabilityRequest, AvailabilityResponse, BookingRequest, BookingResponse, Slot,
};
use crate::booking;
use crate::error::{EngineError, Result};
use crate::filter::CandidateSlot;
use crate::policy::PolicyTable;
use crate::ports::{BusySource, ReservationRequest, ReservationSink};
use crate::projection;
use crate::scanner::{self, ScanParams, MAX_SCAN_DAYS};

/// Availability and booking pipelines over injected collaborators.
///
/// Holds the immutable policy table plus the busy source and reservation
/// sink; no other state. Every request is validated in full before the first
/// collaborator call, and each call runs independently -- the engine is
/// freely shareable across concurrent requests by reference.
pub struct Engine<S, R> {
    policies: PolicyTable,
    busy: S,
    sink: R,
}

impl<S, R> Engine<S, R>
where
    S: BusySource,
    R: ReservationSink,
{
    pub fn new(policies: PolicyTable, busy: S, sink: R) -> Self {
        Engine {
            policies,
            busy,
            sink,
        }
    }

    pub fn policies(&self) -> &PolicyTable {
        &self.policies
    }

    /// List bookable slots, evaluated against the system clock.
    pub async fn availability(&self, request: &AvailabilityRequest) -> Result<AvailabilityResponse> {
        self.availability_at(request, Utc::now()).await
    }

    /// List bookable slots with an explicit `now`, for deterministic runs.
    pub async fn availability_at(
        &self,
        request: &AvailabilityRequest,
        now: DateTime<Utc>,
    ) -> Result<AvailabilityResponse> {
        let policy = self.policies.resolve(&request.resource_id)?;
        let caller_tz = parse_caller_tz(request.caller_timezone.as_deref())?;

        if request.days_to_check == 0 || request.days_to_check > MAX_SCAN_DAYS {
            return Err(EngineError::InvalidWindow(format!(
                "days_to_check must be between 1 and {MAX_SCAN_DAYS}"
            )));
        }
        if request.max_slots == 0 {
            return Err(EngineError::InvalidWindow(
                "max_slots must be positive".to_string(),
            ));
        }

        let alignment = request.alignment_minutes.unwrap_or(policy.alignment_minutes);
        let required = request
            .required_free_minutes
            .unwrap_or(policy.required_free_minutes);
        if alignment == 0 || alignment > 24 * 60 {
            return Err(EngineError::InvalidWindow(format!(
                "alignment_minutes {alignment} is out of range"
            )));
        }
        if required == 0 {
            return Err(EngineError::InvalidWindow(
                "required_free_minutes must be positive".to_string(),
            ));
        }

        let start_date = match request.requested_date.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => now.with_timezone(&policy.timezone).date_naive(),
        };

        debug!(
            resource = %request.resource_id,
            %start_date,
            days = request.days_to_check,
            "availability request"
        );

        let params = ScanParams {
            start_date,
            days_to_check: request.days_to_check,
            alignment_minutes: alignment,
            required_free_minutes: required,
            max_slots: request.max_slots,
        };
        let slots = scanner::scan(&self.busy, &request.resource_id, &policy, &params, now).await?;

        Ok(AvailabilityResponse {
            resource_timezone: policy.timezone.name().to_string(),
            slots: slots
                .into_iter()
                .map(|slot| render_slot(slot, caller_tz))
                .collect(),
        })
    }

    /// Reserve a chosen window, evaluated against the system clock.
    pub async fn book(&self, request: &BookingRequest) -> Result<BookingResponse> {
        self.book_at(request, Utc::now()).await
    }

    /// Reserve a chosen window with an explicit `now`.
    pub async fn book_at(
        &self,
        request: &BookingRequest,
        now: DateTime<Utc>,
    ) -> Result<BookingResponse> {
        let policy = self.policies.resolve(&request.resource_id)?;
        let caller_tz = parse_caller_tz(request.caller_timezone.as_deref())?;

        let target = projection::resolve_selection(
            &request.chosen_start,
            request.duration_minutes,
            caller_tz,
            policy.timezone,
        )?;

        booking::guard_slot(&self.busy, &request.resource_id, &policy, &target, now).await?;

        let summary = request.summary.clone().unwrap_or_else(|| match &request.attendee {
            Some(attendee) => format!("Appointment with {attendee}"),
            None => "Appointment".to_string(),
        });
        let reservation = self
            .sink
            .create_reservation(
                &request.resource_id,
                &ReservationRequest {
                    start: target.start,
                    end: target.end,
                    summary,
                    attendee: request.attendee.clone(),
                },
            )
            .await?;

        info!(
            resource = %request.resource_id,
            reservation = %reservation.id,
            start = %target.start.to_rfc3339(),
            "reserved"
        );

        Ok(BookingResponse {
            reservation_id: reservation.id,
            reservation_link: reservation.link,
        })
    }
}

fn parse_caller_tz(raw: Option<&str>) -> Result<Option<Tz>> {
    raw.map(projection::parse_tz).transpose()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| EngineError::InvalidDate(raw.to_string()))
}

fn render_slot(slot: CandidateSlot, caller_tz: Option<Tz>) -> Slot {
    let (display_start, display_end) = match caller_tz {
        Some(tz) => {
            let (ds, de) = projection::project(&slot.interval(), tz);
            (Some(ds.to_rfc3339()), Some(de.to_rfc3339()))
        }
        None => (None, None),
    };
    Slot {
        date: slot.date,
        start: slot.start.to_rfc3339(),
        end: slot.end.to_rfc3339(),
        display_start,
        display_end,
    }
}
