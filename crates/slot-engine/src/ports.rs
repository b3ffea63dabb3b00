//! Collaborator contracts consumed by the engine.
//!
//! The busy-data source and the reservation sink are the engine's only
//! suspension points; everything else in the pipeline is synchronous and
//! pure. Both collaborators are injected into [`crate::Engine`] at
//! construction -- the engine holds no global client state and never touches
//! credential material itself.

use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::Result;
use crate::interval::RawBusy;

/// Source of raw busy periods for a resource.
#[async_trait]
pub trait BusySource: Send + Sync {
    /// Fetch every busy entry overlapping `[time_min, time_max)`.
    ///
    /// Entries may be unmerged, overlapping, or date-only; the engine
    /// normalizes and merges them. Failures surface as
    /// [`crate::EngineError::UpstreamUnavailable`].
    async fn fetch_busy(
        &self,
        resource_id: &str,
        time_min: DateTime<Tz>,
        time_max: DateTime<Tz>,
    ) -> Result<Vec<RawBusy>>;
}

/// Canonical reservation payload sent to the sink.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub summary: String,
    pub attendee: Option<String>,
}

/// A created reservation.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub link: Option<String>,
}

/// Sink that commits reservations.
///
/// The engine's conflict guard is advisory only: two concurrent bookings for
/// the same slot can both pass it. Implementations must enforce the real
/// exclusion -- a conditional or idempotent create that rejects a duplicate
/// reservation for the same resource and interval.
#[async_trait]
pub trait ReservationSink: Send + Sync {
    /// Create a reservation. Failures surface as
    /// [`crate::EngineError::UpstreamUnavailable`], except a rejection
    /// meaning "cannot notify attendees under current trust configuration",
    /// which must map to
    /// [`crate::EngineError::AttendeeNotificationUnsupported`].
    async fn create_reservation(
        &self,
        resource_id: &str,
        request: &ReservationRequest,
    ) -> Result<Reservation>;
}
