//! Error types for engine operations.

use thiserror::Error;

/// Errors produced by the availability and booking pipelines.
///
/// Every variant maps to a stable machine-readable kind (see [`EngineError::kind`])
/// so callers can branch without string-matching display output. Messages carry
/// no credential or internal detail.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A date string could not be parsed, or a computed date is out of range.
    #[error("invalid date: {0}")]
    InvalidDate(String),

    /// A degenerate interval, misconfigured operating hours, or out-of-bounds
    /// scan parameters.
    #[error("invalid window: {0}")]
    InvalidWindow(String),

    /// No scheduling policy is registered for the requested resource.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// Not a valid IANA timezone identifier.
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    /// The busy source or reservation sink failed. Retryable by the caller;
    /// the engine itself never retries.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// The conflict guard found the chosen slot taken between quote and
    /// commit. Terminal for the current request.
    #[error("slot no longer available: {0}")]
    SlotNoLongerAvailable(String),

    /// The reservation sink cannot notify attendees under its current trust
    /// configuration.
    #[error("attendee notifications unsupported: {0}")]
    AttendeeNotificationUnsupported(String),
}

impl EngineError {
    /// Stable snake_case identifier for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::InvalidDate(_) => "invalid_date",
            EngineError::InvalidWindow(_) => "invalid_window",
            EngineError::UnknownResource(_) => "unknown_resource",
            EngineError::InvalidTimezone(_) => "invalid_timezone",
            EngineError::UpstreamUnavailable(_) => "upstream_unavailable",
            EngineError::SlotNoLongerAvailable(_) => "slot_no_longer_available",
            EngineError::AttendeeNotificationUnsupported(_) => {
                "attendee_notification_unsupported"
            }
        }
    }

    /// Whether a caller may reasonably retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, EngineError::UpstreamUnavailable(_))
    }
}

/// Convenience alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
