//! Booking construction and normalization errors
//!
//! These are programmer/input errors raised while *building* a well-formed
//! booking request (empty window, unparseable form fields). They are distinct
//! from a business rejection: a request that fails here never reaches the
//! availability rules.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The window would be empty or inverted (`end <= start`).
    #[error("booking window is empty: start {start} must be before end {end}")]
    EmptyWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A booking must bring at least one occupant.
    #[error("occupancy must be at least 1")]
    ZeroOccupancy,

    #[error("invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid time {value:?}: expected HH:MM or HH:MM:SS")]
    InvalidTime { value: String },

    /// UTC offsets beyond ±14 hours do not exist on any civil calendar.
    #[error("utc offset of {minutes} minutes is out of range (±14 hours)")]
    OffsetOutOfRange { minutes: i32 },
}
