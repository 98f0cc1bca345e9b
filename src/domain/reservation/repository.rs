//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::model::{Reservation, ReservationStatus};
use crate::domain::booking::{BookingRequest, RejectReason};
use crate::domain::DomainResult;

/// Result of [`ReservationRepository::insert_if_no_conflict`]
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// Every rule passed; the pending reservation now holds its slot
    Inserted(Reservation),
    /// A rule rejected the candidate; nothing was written
    Rejected(RejectReason),
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Validate a candidate and insert it in a single step.
    ///
    /// The rule check and the write happen under the resource's slot lock,
    /// so two overlapping candidates racing for the same resource can never
    /// both be inserted. Accepted candidates are stored as `Pending`.
    async fn insert_if_no_conflict(
        &self,
        request: &BookingRequest,
        requester: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<InsertOutcome>;

    /// Find reservation by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>>;

    /// Find all reservations (any status)
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;

    /// Find reservations for a resource, optionally narrowed to one status
    async fn find_for_resource(
        &self,
        resource_id: &str,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>>;

    /// Find pending reservations whose window already ended (window.end <= now)
    async fn find_stale_pending(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>>;

    /// Approve a pending reservation
    async fn approve(&self, id: Uuid, now: DateTime<Utc>) -> DomainResult<Reservation>;

    /// Decline a pending reservation, releasing its slot
    async fn decline(&self, id: Uuid, now: DateTime<Utc>) -> DomainResult<Reservation>;

    /// Count reservations (any status)
    async fn count(&self) -> DomainResult<usize>;
}
