//! Half-open time window value type

use chrono::{DateTime, Duration, Utc};

use super::error::BookingError;

/// A half-open time range `[start, end)` in UTC.
///
/// The start instant is inclusive, the end instant exclusive, so a window
/// ending at 10:00 and a window starting at 10:00 touch but do not overlap.
/// Back-to-back bookings are allowed by construction.
///
/// Invariant: `start < end`, enforced by [`BookingWindow::new`]. Fields are
/// private so a window can never be observed in a malformed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingWindow {
    /// Build a window, rejecting empty or inverted ranges.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingError> {
        if end <= start {
            return Err(BookingError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive start instant.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end instant.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant falls inside the window (start inclusive, end
    /// exclusive).
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`.
    ///
    /// Windows that merely touch (one ends exactly where the other starts)
    /// do not overlap.
    pub fn overlaps(&self, other: &BookingWindow) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether the whole window lies before `instant` (`end <= instant`).
    pub fn ends_before(&self, instant: DateTime<Utc>) -> bool {
        self.end <= instant
    }
}

impl std::fmt::Display for BookingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, hour, min, 0).unwrap()
    }

    fn window(start_h: u32, end_h: u32) -> BookingWindow {
        BookingWindow::new(at(start_h, 0), at(end_h, 0)).unwrap()
    }

    #[test]
    fn constructs_when_start_before_end() {
        let w = BookingWindow::new(at(9, 0), at(10, 0)).unwrap();
        assert_eq!(w.start(), at(9, 0));
        assert_eq!(w.end(), at(10, 0));
        assert_eq!(w.duration(), Duration::hours(1));
    }

    #[test]
    fn rejects_equal_start_and_end() {
        let err = BookingWindow::new(at(9, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, BookingError::EmptyWindow { .. }));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = BookingWindow::new(at(10, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, BookingError::EmptyWindow { .. }));
    }

    #[test]
    fn overlap_detected_for_partial_intersection() {
        // [9,11) vs [10,12)
        assert!(window(9, 11).overlaps(&window(10, 12)));
        assert!(window(10, 12).overlaps(&window(9, 11)));
    }

    #[test]
    fn overlap_detected_for_containment() {
        // [9,12) fully contains [10,11)
        assert!(window(9, 12).overlaps(&window(10, 11)));
        assert!(window(10, 11).overlaps(&window(9, 12)));
    }

    #[test]
    fn back_to_back_windows_do_not_overlap() {
        // [9,10) then [10,11): the shared instant belongs to the later window only
        assert!(!window(9, 10).overlaps(&window(10, 11)));
        assert!(!window(10, 11).overlaps(&window(9, 10)));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        assert!(!window(9, 10).overlaps(&window(14, 15)));
    }

    #[test]
    fn contains_is_start_inclusive_end_exclusive() {
        let w = window(9, 10);
        assert!(w.contains(at(9, 0)));
        assert!(w.contains(at(9, 59)));
        assert!(!w.contains(at(10, 0)));
        assert!(!w.contains(at(8, 59)));
    }

    #[test]
    fn ends_before_uses_exclusive_end() {
        let w = window(9, 10);
        assert!(w.ends_before(at(10, 0)));
        assert!(w.ends_before(at(11, 0)));
        assert!(!w.ends_before(at(9, 30)));
    }
}
