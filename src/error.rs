//! Error taxonomy for availability computation.
//!
//! Configuration mistakes (malformed times, inverted windows, zero
//! duration or capacity) surface as errors rather than being silently
//! corrected — a guessed schedule is an overbookable schedule. An
//! unresolvable timezone is deliberately *not* here: it degrades to a
//! fallback zone inside [`Business::resolve_timezone`](crate::models::Business::resolve_timezone).

use thiserror::Error;

use crate::models::Weekday;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Availability computation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A schedule entry's time string does not parse as `HH:MM`.
    #[error("invalid time {value:?} for {day}: expected HH:MM")]
    InvalidScheduleTime {
        /// The weekday whose entry is malformed.
        day: Weekday,
        /// The offending string.
        value: String,
    },

    /// A schedule entry opens at or after it closes.
    #[error("schedule for {day} opens at or after it closes ({open} >= {close})")]
    EmptyWindow {
        /// The weekday whose entry is inverted.
        day: Weekday,
        /// Configured opening time.
        open: String,
        /// Configured closing time.
        close: String,
    },

    /// Service duration must be a positive number of minutes.
    #[error("service duration must be positive, got {0}")]
    InvalidDuration(u32),

    /// Business capacity must be at least one station.
    #[error("business capacity must be positive, got {0}")]
    InvalidCapacity(u32),

    /// Caller-supplied date or local time could not be interpreted.
    #[error("invalid date/time: {0}")]
    InvalidDate(String),
}
