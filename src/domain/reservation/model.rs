//! Reservation domain entity

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::booking::{BookingRequest, BookingWindow};

/// Reservation lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Awaiting an operator decision; already holds its slot
    Pending,
    /// Confirmed by an operator
    Approved,
    /// Declined by an operator or the housekeeping sweep; slot released
    Rejected,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a wire value. Unknown strings are rejected rather than coerced.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether a reservation in this status holds its slot against others
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation of a resource for a time window
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Unique reservation ID
    pub id: Uuid,
    /// Resource being reserved
    pub resource_id: String,
    /// Reserved time window (UTC, half-open)
    pub window: BookingWindow,
    /// Number of people the reservation is for
    pub occupancy: u32,
    /// Who requested the reservation
    pub requester: String,
    /// Current lifecycle status
    pub status: ReservationStatus,
    /// When the reservation was created
    pub created_at: DateTime<Utc>,
    /// When an operator approved or declined it
    pub decided_at: Option<DateTime<Utc>>,
}

impl Reservation {
    /// Builds a pending reservation from an accepted booking request.
    pub fn new(
        id: Uuid,
        request: &BookingRequest,
        requester: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            resource_id: request.resource_id().to_string(),
            window: request.window(),
            occupancy: request.occupancy(),
            requester: requester.into(),
            status: ReservationStatus::Pending,
            created_at: now,
            decided_at: None,
        }
    }

    /// Confirm this reservation
    pub fn approve(&mut self, now: DateTime<Utc>) {
        self.status = ReservationStatus::Approved;
        self.decided_at = Some(now);
    }

    /// Decline this reservation, releasing its slot
    pub fn decline(&mut self, now: DateTime<Utc>) {
        self.status = ReservationStatus::Rejected;
        self.decided_at = Some(now);
    }

    /// Check if this reservation holds its slot against new candidates
    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }

    /// Check if this reservation is still awaiting a decision
    pub fn is_pending(&self) -> bool {
        self.status == ReservationStatus::Pending
    }
}

// ── Tests ──────────────────────────────────────────────────────
