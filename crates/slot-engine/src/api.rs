//! Request and response contracts at the engine boundary.
//!
//! This is the only layer that deals in external field shapes and string
//! datetimes; everything inside the engine works on one canonical
//! configuration and on zone-aware instants. Per-request
//! `required_free_minutes` / `alignment_minutes` override the resource
//! policy when present.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Availability query for one resource over a bounded day range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub resource_id: String,
    /// First day to scan, `YYYY-MM-DD` in the resource timezone. Defaults to
    /// today in that zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_date: Option<String>,
    #[serde(default = "default_days_to_check")]
    pub days_to_check: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_free_minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_minutes: Option<u32>,
    #[serde(default = "default_max_slots")]
    pub max_slots: usize,
    /// IANA zone for the display projection of returned slots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_timezone: Option<String>,
}

fn default_days_to_check() -> u32 {
    7
}

fn default_max_slots() -> usize {
    10
}

impl AvailabilityRequest {
    /// A request for `resource_id` with every other field at its default.
    pub fn new(resource_id: impl Into<String>) -> Self {
        AvailabilityRequest {
            resource_id: resource_id.into(),
            requested_date: None,
            days_to_check: default_days_to_check(),
            required_free_minutes: None,
            alignment_minutes: None,
            max_slots: default_max_slots(),
            caller_timezone: None,
        }
    }
}

/// One bookable slot in a response. `start`/`end` are RFC 3339 in the
/// resource timezone; the display pair is present only when the request
/// named a caller timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub date: NaiveDate,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub resource_timezone: String,
    pub slots: Vec<Slot>,
}

/// Request to reserve a specific chosen window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub resource_id: String,
    /// RFC 3339 (zone-qualified), or a naive local time interpreted in
    /// `caller_timezone` (resource timezone when absent).
    pub chosen_start: String,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attendee: Option<String>,
    /// Reservation summary; derived from the attendee when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl BookingRequest {
    pub fn new(
        resource_id: impl Into<String>,
        chosen_start: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        BookingRequest {
            resource_id: resource_id.into(),
            chosen_start: chosen_start.into(),
            duration_minutes,
            caller_timezone: None,
            attendee: None,
            summary: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub reservation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_link: Option<String>,
}
