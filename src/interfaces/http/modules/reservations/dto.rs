//! Reservation DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Reservation, ReservationStatus};

/// Request to book a resource.
///
/// Times are wall-clock values in the client's local time; `utc_offset_minutes`
/// says how far east of UTC that clock is (0 if omitted).
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    /// Resource to reserve
    #[validate(length(min = 1))]
    pub resource_id: String,
    /// Calendar date of the window (YYYY-MM-DD)
    #[validate(length(min = 1))]
    pub date: String,
    /// Local start time (HH:MM or HH:MM:SS)
    #[validate(length(min = 1))]
    pub start_time: String,
    /// Local end time (HH:MM or HH:MM:SS), same calendar date
    #[validate(length(min = 1))]
    pub end_time: String,
    /// Minutes east of UTC for the wall-clock fields above
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    pub utc_offset_minutes: i32,
    /// Number of people the reservation is for
    #[validate(range(min = 1))]
    pub occupancy: u32,
    /// Who is booking
    #[validate(length(min = 1, max = 120))]
    pub requester: String,
}

/// Request to evaluate a candidate window without claiming it
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CheckAvailabilityRequest {
    /// Resource to check
    #[validate(length(min = 1))]
    pub resource_id: String,
    /// Calendar date of the window (YYYY-MM-DD)
    #[validate(length(min = 1))]
    pub date: String,
    /// Local start time (HH:MM or HH:MM:SS)
    #[validate(length(min = 1))]
    pub start_time: String,
    /// Local end time (HH:MM or HH:MM:SS), same calendar date
    #[validate(length(min = 1))]
    pub end_time: String,
    /// Minutes east of UTC for the wall-clock fields above
    #[serde(default)]
    #[validate(range(min = -840, max = 840))]
    pub utc_offset_minutes: i32,
    /// Number of people the reservation would be for
    #[validate(range(min = 1))]
    pub occupancy: u32,
}

/// Query parameters for reservation listings
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListReservationsQuery {
    /// Narrow to one status: "pending", "approved" or "rejected"
    pub status: Option<String>,
}

impl ListReservationsQuery {
    /// Resolves the optional status filter, rejecting unknown values
    pub fn parse_status(&self) -> Result<Option<ReservationStatus>, String> {
        match &self.status {
            None => Ok(None),
            Some(value) => ReservationStatus::from_str(value).map(Some).ok_or_else(|| {
                format!(
                    "Unknown status '{}' (expected 'pending', 'approved' or 'rejected')",
                    value
                )
            }),
        }
    }
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub resource_id: String,
    /// Window start, RFC 3339 UTC
    pub start: String,
    /// Window end, RFC 3339 UTC (exclusive)
    pub end: String,
    pub occupancy: u32,
    pub requester: String,
    pub status: String,
    pub created_at: String,
    pub decided_at: Option<String>,
}

impl ReservationDto {
    pub fn from_domain(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id.to_string(),
            resource_id: reservation.resource_id.clone(),
            start: reservation.window.start().to_rfc3339(),
            end: reservation.window.end().to_rfc3339(),
            occupancy: reservation.occupancy,
            requester: reservation.requester.clone(),
            status: reservation.status.as_str().to_string(),
            created_at: reservation.created_at.to_rfc3339(),
            decided_at: reservation.decided_at.map(|dt| dt.to_rfc3339()),
        }
    }
}

/// Response from requesting a reservation
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateReservationResponse {
    /// "accepted" or "rejected"
    pub decision: String,
    /// Rejection reason code ("past_start", "capacity_exceeded",
    /// "resource_unavailable", "slot_conflict"); absent when accepted
    pub reason: Option<String>,
    pub message: Option<String>,
    /// The stored reservation; absent when rejected
    pub reservation: Option<ReservationDto>,
}

/// Response from an availability check
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    /// Whether the candidate would be accepted right now
    pub available: bool,
    /// Rejection reason code when not available
    pub reason: Option<String>,
    pub message: Option<String>,
    /// Blocking reservations overlapping the requested window
    pub conflicts: Vec<ReservationDto>,
}
