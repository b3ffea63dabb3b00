//! # slot-engine
//!
//! Availability and booking engine for a calendar-backed resource.
//!
//! Turns raw busy periods plus a per-resource scheduling policy into
//! grid-aligned bookable slots, projects them between the resource's
//! canonical timezone and a caller's display timezone, and re-validates a
//! chosen slot against fresh busy data immediately before reservation. The
//! engine owns no persistent state: the busy-data source and reservation
//! sink are injected collaborators, and the policy table is built once at
//! startup and immutable afterwards.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::TimeZone;
//! use chrono_tz::Tz;
//! use slot_engine::{merge_intervals, Interval};
//!
//! let tz: Tz = "Europe/Madrid".parse().unwrap();
//! let busy = vec![
//!     Interval::new(
//!         tz.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap(),
//!         tz.with_ymd_and_hms(2026, 3, 16, 9, 15, 0).unwrap(),
//!     )
//!     .unwrap(),
//!     Interval::new(
//!         tz.with_ymd_and_hms(2026, 3, 16, 9, 10, 0).unwrap(),
//!         tz.with_ymd_and_hms(2026, 3, 16, 9, 30, 0).unwrap(),
//!     )
//!     .unwrap(),
//! ];
//!
//! let merged = merge_intervals(busy);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].duration_minutes(), 30);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — half-open intervals, raw busy normalization, merging
//! - [`policy`] — scheduling policy resolution and the immutable table
//! - [`window`] — per-day bookable windows (weekend exclusion)
//! - [`candidates`] — lazy grid-aligned candidate generation
//! - [`filter`] — availability filtering against busy data and "now"
//! - [`scanner`] — multi-day orchestration with a slot quota
//! - [`projection`] — timezone display projection and selection reversal
//! - [`booking`] — the pre-reservation conflict guard
//! - [`ports`] — async collaborator contracts (busy source, reservation sink)
//! - [`api`] — request/response boundary types
//! - [`engine`] — the dependency-injected façade
//! - [`error`] — error taxonomy

pub mod api;
pub mod booking;
pub mod candidates;
pub mod engine;
pub mod error;
pub mod filter;
pub mod interval;
pub mod policy;
pub mod ports;
pub mod projection;
pub mod scanner;
pub mod window;

pub use api::{AvailabilityRequest, AvailabilityResponse, BookingRequest, BookingResponse, Slot};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use filter::CandidateSlot;
pub use interval::{merge_busy, merge_intervals, Interval, RawBusy};
pub use policy::{PolicyOverrides, PolicyTable, SchedulingPolicy};
pub use ports::{BusySource, Reservation, ReservationRequest, ReservationSink};
