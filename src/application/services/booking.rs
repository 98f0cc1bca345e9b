//! Booking business logic service

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::booking::{conflicting_reservations, validate, BookingRequest, Decision};
use crate::domain::{DomainError, DomainResult, InsertOutcome, RepositoryProvider, Reservation};

/// Outcome of an advisory availability check
#[derive(Debug)]
pub struct AvailabilityReport {
    /// What the rules say right now; not a hold on the slot
    pub decision: Decision,
    /// Every blocking reservation overlapping the candidate's window
    pub conflicts: Vec<Reservation>,
}

/// Service for booking operations
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Evaluate a candidate without writing anything.
    ///
    /// The answer can go stale the moment it is produced; only
    /// [`request_booking`](Self::request_booking) actually claims a slot.
    pub async fn check_availability(
        &self,
        request: &BookingRequest,
    ) -> DomainResult<AvailabilityReport> {
        let resource = self
            .repos
            .resources()
            .find_by_id(request.resource_id())
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity: "resource",
                field: "id",
                value: request.resource_id().to_string(),
            })?;
        let held = self
            .repos
            .reservations()
            .find_for_resource(request.resource_id(), None)
            .await?;

        let decision = validate(request, &resource, &held, Utc::now());
        let conflicts = conflicting_reservations(request, &held)
            .into_iter()
            .cloned()
            .collect();

        Ok(AvailabilityReport {
            decision,
            conflicts,
        })
    }

    /// Run the rules and claim the slot in one atomic step.
    pub async fn request_booking(
        &self,
        request: &BookingRequest,
        requester: &str,
    ) -> DomainResult<InsertOutcome> {
        let outcome = self
            .repos
            .reservations()
            .insert_if_no_conflict(request, requester, Utc::now())
            .await?;

        match &outcome {
            InsertOutcome::Inserted(reservation) => {
                metrics::counter!("booking_decisions_total", "outcome" => "accepted").increment(1);
                info!(
                    reservation_id = %reservation.id,
                    resource_id = %reservation.resource_id,
                    window = %reservation.window,
                    occupancy = reservation.occupancy,
                    "📅 Reservation created"
                );
            }
            InsertOutcome::Rejected(reason) => {
                metrics::counter!("booking_decisions_total", "outcome" => reason.as_str())
                    .increment(1);
                info!(
                    resource_id = %request.resource_id(),
                    reason = %reason,
                    "Booking rejected"
                );
            }
        }

        Ok(outcome)
    }

    /// Approve a pending reservation
    pub async fn approve(&self, id: Uuid) -> DomainResult<Reservation> {
        let reservation = self.repos.reservations().approve(id, Utc::now()).await?;
        info!(reservation_id = %id, "Reservation approved");
        Ok(reservation)
    }

    /// Decline a pending reservation, releasing its slot
    pub async fn decline(&self, id: Uuid) -> DomainResult<Reservation> {
        let reservation = self.repos.reservations().decline(id, Utc::now()).await?;
        info!(reservation_id = %id, "Reservation declined");
        Ok(reservation)
    }
}

// ── Tests ──────────────────────────────────────────────────────
