//! Local date/time normalization for booking input
//!
//! Clients submit wall-clock fields (`date`, `start_time`, `end_time`) plus a
//! UTC offset in minutes. Everything is converted to UTC here, at the edge,
//! so the validator and the store only ever compare UTC instants.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use super::error::BookingError;
use super::window::BookingWindow;

/// Largest legal UTC offset, in minutes (UTC+14:00 / UTC-14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Parses a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| BookingError::InvalidDate {
        value: value.to_string(),
    })
}

/// Parses a wall-clock time, accepting `HH:MM:SS` or the shorter `HH:MM`.
pub fn parse_time(value: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| BookingError::InvalidTime {
            value: value.to_string(),
        })
}

/// Builds a `FixedOffset` from an offset in minutes east of UTC.
pub fn utc_offset(minutes: i32) -> Result<FixedOffset, BookingError> {
    // Bounds checked directly; abs() would overflow on i32::MIN
    if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
        return Err(BookingError::OffsetOutOfRange { minutes });
    }
    FixedOffset::east_opt(minutes * 60).ok_or(BookingError::OffsetOutOfRange { minutes })
}

/// Converts a local wall-clock date + time to the UTC instant it names.
pub fn to_instant(date: NaiveDate, time: NaiveTime, offset: FixedOffset) -> DateTime<Utc> {
    // Subtracting the offset rebases the naive local time onto UTC.
    Utc.from_utc_datetime(&(date.and_time(time) - offset))
}

/// Normalizes raw wall-clock fields into a UTC [`BookingWindow`].
///
/// Both endpoints share the same calendar date, so an `end_time` at or before
/// `start_time` yields [`BookingError::EmptyWindow`] rather than rolling over
/// to the next day.
pub fn window_from_parts(
    date: &str,
    start_time: &str,
    end_time: &str,
    offset_minutes: i32,
) -> Result<BookingWindow, BookingError> {
    let day = parse_date(date)?;
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    let offset = utc_offset(offset_minutes)?;

    BookingWindow::new(
        to_instant(day, start, offset),
        to_instant(day, end, offset),
    )
}

// ── Tests ──────────────────────────────────────────────────────
