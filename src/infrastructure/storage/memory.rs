//! In-memory storage implementation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, Entry};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::booking::{validate, BookingRequest, Decision};
use crate::domain::{
    DomainError, DomainResult, InsertOutcome, RepositoryProvider, Reservation,
    ReservationRepository, ReservationStatus, Resource, ResourceRepository, ResourceStatus,
};

/// In-memory store backing both repositories.
///
/// Reservations and resources live in concurrent maps. Each resource gets a
/// slot lock; `insert_if_no_conflict` holds it across the rule check and the
/// write, so overlapping candidates for one resource serialize while traffic
/// on different resources stays independent.
pub struct InMemoryStore {
    resources: DashMap<String, Resource>,
    reservations: DashMap<Uuid, Reservation>,
    slot_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            resources: DashMap::new(),
            reservations: DashMap::new(),
            slot_locks: DashMap::new(),
        }
    }

    /// Registers a few resources so a fresh instance is usable right away
    pub fn seed_demo_data(&self) {
        for resource in [
            Resource::new(
                "court-1",
                "Tennis Court 1",
                Some("Outdoor clay court".into()),
                4,
            ),
            Resource::new(
                "court-2",
                "Tennis Court 2",
                Some("Indoor hard court".into()),
                4,
            ),
            Resource::new(
                "room-a",
                "Meeting Room A",
                Some("2nd floor, projector and whiteboard".into()),
                8,
            ),
        ] {
            self.resources.insert(resource.id.clone(), resource);
        }
    }

    fn slot_lock(&self, resource_id: &str) -> Arc<Mutex<()>> {
        self.slot_locks
            .entry(resource_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn reservations_for(&self, resource_id: &str) -> Vec<Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.resource_id == resource_id)
            .map(|r| r.clone())
            .collect()
    }

    fn resource_not_found(id: &str) -> DomainError {
        DomainError::NotFound {
            entity: "resource",
            field: "id",
            value: id.to_string(),
        }
    }

    fn reservation_not_found(id: Uuid) -> DomainError {
        DomainError::NotFound {
            entity: "reservation",
            field: "id",
            value: id.to_string(),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryStore {
    fn resources(&self) -> &dyn ResourceRepository {
        self
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        self
    }
}

#[async_trait]
impl ResourceRepository for InMemoryStore {
    async fn save(&self, resource: Resource) -> DomainResult<()> {
        // entry() holds the shard lock, so the uniqueness check and the
        // write cannot interleave with a concurrent save of the same id
        match self.resources.entry(resource.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "resource {} already exists",
                resource.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(resource);
                Ok(())
            }
        }
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Resource>> {
        Ok(self.resources.get(id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Resource>> {
        Ok(self.resources.iter().map(|r| r.clone()).collect())
    }

    async fn set_status(&self, id: &str, status: ResourceStatus) -> DomainResult<Resource> {
        if let Some(mut resource) = self.resources.get_mut(id) {
            resource.status = status;
            Ok(resource.clone())
        } else {
            Err(Self::resource_not_found(id))
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        // Taken so the cascade cannot interleave with an in-flight insert
        let lock = self.slot_lock(id);
        let _guard = lock.lock().await;

        let removed = self.resources.remove(id);
        if removed.is_some() {
            self.reservations.retain(|_, r| r.resource_id != id);
        }
        // The lock entry goes with the resource; clones already handed out
        // keep the Mutex alive until their guards drop
        self.slot_locks.remove(id);

        removed
            .map(|_| ())
            .ok_or_else(|| Self::resource_not_found(id))
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.resources.len())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryStore {
    async fn insert_if_no_conflict(
        &self,
        request: &BookingRequest,
        requester: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<InsertOutcome> {
        let lock = self.slot_lock(request.resource_id());
        let _guard = lock.lock().await;

        let resource = self
            .resources
            .get(request.resource_id())
            .map(|r| r.clone())
            .ok_or_else(|| Self::resource_not_found(request.resource_id()))?;
        let held = self.reservations_for(request.resource_id());

        match validate(request, &resource, &held, now) {
            Decision::Accepted => {
                let reservation = Reservation::new(Uuid::new_v4(), request, requester, now);
                self.reservations.insert(reservation.id, reservation.clone());
                Ok(InsertOutcome::Inserted(reservation))
            }
            Decision::Rejected(reason) => Ok(InsertOutcome::Rejected(reason)),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Reservation>> {
        Ok(self.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        Ok(self.reservations.iter().map(|r| r.clone()).collect())
    }

    async fn find_for_resource(
        &self,
        resource_id: &str,
        status: Option<ReservationStatus>,
    ) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| {
                r.resource_id == resource_id && status.map_or(true, |s| r.status == s)
            })
            .map(|r| r.clone())
            .collect())
    }

    async fn find_stale_pending(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>> {
        Ok(self
            .reservations
            .iter()
            .filter(|r| r.is_pending() && r.window.ends_before(now))
            .map(|r| r.clone())
            .collect())
    }

    async fn approve(&self, id: Uuid, now: DateTime<Utc>) -> DomainResult<Reservation> {
        let mut reservation = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| Self::reservation_not_found(id))?;
        if !reservation.is_pending() {
            return Err(DomainError::Conflict(format!(
                "reservation {} is already {}",
                id, reservation.status
            )));
        }
        reservation.approve(now);
        Ok(reservation.clone())
    }

    async fn decline(&self, id: Uuid, now: DateTime<Utc>) -> DomainResult<Reservation> {
        let mut reservation = self
            .reservations
            .get_mut(&id)
            .ok_or_else(|| Self::reservation_not_found(id))?;
        if !reservation.is_pending() {
            return Err(DomainError::Conflict(format!(
                "reservation {} is already {}",
                id, reservation.status
            )));
        }
        reservation.decline(now);
        Ok(reservation.clone())
    }

    async fn count(&self) -> DomainResult<usize> {
        Ok(self.reservations.len())
    }
}

// ── Tests ──────────────────────────────────────────────────────
