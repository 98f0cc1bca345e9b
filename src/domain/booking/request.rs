//! Candidate booking request value type

use super::error::BookingError;
use super::window::BookingWindow;

/// A candidate reservation: which resource, when, and for how many people.
///
/// Built fresh for every availability evaluation and discarded afterwards;
/// only the store turns an accepted request into a persisted reservation.
/// Validated at construction (`occupancy >= 1`; the window enforces its own
/// `start < end` invariant), so downstream rules never see malformed input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    resource_id: String,
    window: BookingWindow,
    occupancy: u32,
}

impl BookingRequest {
    pub fn new(
        resource_id: impl Into<String>,
        window: BookingWindow,
        occupancy: u32,
    ) -> Result<Self, BookingError> {
        if occupancy == 0 {
            return Err(BookingError::ZeroOccupancy);
        }
        Ok(Self {
            resource_id: resource_id.into(),
            window,
            occupancy,
        })
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn window(&self) -> BookingWindow {
        self.window
    }

    pub fn occupancy(&self) -> u32 {
        self.occupancy
    }
}

// ── Tests ──────────────────────────────────────────────────────
