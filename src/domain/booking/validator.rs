//! Booking validation rules
//!
//! [`validate`] runs the rejection rules in a fixed order and stops at the
//! first failure: past start, then capacity, then resource status, then slot
//! conflict. The function is pure; callers that need the decision and the
//! write to be atomic go through
//! [`ReservationRepository::insert_if_no_conflict`](crate::domain::reservation::ReservationRepository::insert_if_no_conflict),
//! which runs this same check under the resource's slot lock.

use chrono::{DateTime, Utc};

use super::request::BookingRequest;
use crate::domain::reservation::Reservation;
use crate::domain::resource::Resource;

/// Why a candidate booking was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Window starts before the evaluation instant
    PastStart,
    /// Requested occupancy exceeds the resource capacity
    CapacityExceeded,
    /// Resource is not accepting reservations
    ResourceUnavailable,
    /// Window overlaps a pending or approved reservation
    SlotConflict,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PastStart => "past_start",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::ResourceUnavailable => "resource_unavailable",
            Self::SlotConflict => "slot_conflict",
        }
    }

    /// Human-readable explanation for API responses
    pub fn message(&self) -> &'static str {
        match self {
            Self::PastStart => "reservation window starts in the past",
            Self::CapacityExceeded => "requested occupancy exceeds resource capacity",
            Self::ResourceUnavailable => "resource is not accepting reservations",
            Self::SlotConflict => "time window overlaps an existing reservation",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of validating a candidate booking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accepted,
    Rejected(RejectReason),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Validates a candidate booking against a resource and its reservations.
///
/// `existing` may contain reservations of any status and any resource; only
/// blocking ones (pending, approved) on the candidate's resource count as
/// conflicts. A window that merely touches another (`end == start`) does not
/// conflict. `start == now` is still bookable.
pub fn validate(
    candidate: &BookingRequest,
    resource: &Resource,
    existing: &[Reservation],
    now: DateTime<Utc>,
) -> Decision {
    let window = candidate.window();

    if window.start() < now {
        return Decision::Rejected(RejectReason::PastStart);
    }

    if candidate.occupancy() > resource.capacity {
        return Decision::Rejected(RejectReason::CapacityExceeded);
    }

    if !resource.is_available() {
        return Decision::Rejected(RejectReason::ResourceUnavailable);
    }

    // `any` stops at the first blocking overlap.
    let conflict = existing.iter().any(|r| {
        r.resource_id == candidate.resource_id() && r.is_blocking() && r.window.overlaps(&window)
    });
    if conflict {
        return Decision::Rejected(RejectReason::SlotConflict);
    }

    Decision::Accepted
}

/// Collects every blocking reservation that overlaps the candidate's window.
///
/// Unlike [`validate`] this does not stop at the first hit; availability
/// previews use it to report all conflicts at once.
pub fn conflicting_reservations<'a>(
    candidate: &BookingRequest,
    existing: &'a [Reservation],
) -> Vec<&'a Reservation> {
    let window = candidate.window();
    existing
        .iter()
        .filter(|r| {
            r.resource_id == candidate.resource_id() && r.is_blocking() && r.window.overlaps(&window)
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingWindow;
    use crate::domain::reservation::ReservationStatus;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, hour, min, 0).unwrap()
    }

    fn window(start_h: u32, end_h: u32) -> BookingWindow {
        BookingWindow::new(at(start_h, 0), at(end_h, 0)).unwrap()
    }

    fn sample_resource(capacity: u32) -> Resource {
        Resource::new("court-1", "Tennis Court 1", None, capacity)
    }

    fn candidate(start_h: u32, end_h: u32, occupancy: u32) -> BookingRequest {
        BookingRequest::new("court-1", window(start_h, end_h), occupancy).unwrap()
    }

    fn existing(start_h: u32, end_h: u32, status: ReservationStatus) -> Reservation {
        existing_on("court-1", start_h, end_h, status)
    }

    fn existing_on(
        resource_id: &str,
        start_h: u32,
        end_h: u32,
        status: ReservationStatus,
    ) -> Reservation {
        let request =
            BookingRequest::new(resource_id, window(start_h, end_h), 1).unwrap();
        let mut r = Reservation::new(Uuid::new_v4(), &request, "bob", at(0, 0));
        match status {
            ReservationStatus::Pending => {}
            ReservationStatus::Approved => r.approve(at(0, 0)),
            ReservationStatus::Rejected => r.decline(at(0, 0)),
        }
        r
    }

    #[test]
    fn accepts_free_slot() {
        let decision = validate(&candidate(10, 12, 3), &sample_resource(5), &[], at(8, 0));
        assert_eq!(decision, Decision::Accepted);
        assert!(decision.is_accepted());
    }

    #[test]
    fn rejects_start_in_past() {
        let decision = validate(&candidate(10, 12, 3), &sample_resource(5), &[], at(11, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::PastStart));
    }

    #[test]
    fn accepts_start_exactly_at_now() {
        // start == now is still bookable; only strictly-past starts fail
        let decision = validate(&candidate(10, 12, 3), &sample_resource(5), &[], at(10, 0));
        assert_eq!(decision, Decision::Accepted);
    }

    #[test]
    fn accepts_occupancy_equal_to_capacity() {
        let decision = validate(&candidate(10, 12, 5), &sample_resource(5), &[], at(8, 0));
        assert_eq!(decision, Decision::Accepted);
    }

    #[test]
    fn rejects_occupancy_above_capacity() {
        let decision = validate(&candidate(10, 12, 6), &sample_resource(5), &[], at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::CapacityExceeded));
    }

    #[test]
    fn rejects_unavailable_resource() {
        let mut resource = sample_resource(5);
        resource.mark_unavailable();
        let decision = validate(&candidate(10, 12, 3), &resource, &[], at(8, 0));
        assert_eq!(
            decision,
            Decision::Rejected(RejectReason::ResourceUnavailable)
        );
    }

    #[test]
    fn rejects_overlap_with_pending() {
        let held = vec![existing(10, 12, ReservationStatus::Pending)];
        let decision = validate(&candidate(11, 13, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::SlotConflict));
    }

    #[test]
    fn rejects_overlap_with_approved() {
        let held = vec![existing(10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(11, 13, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::SlotConflict));
    }

    #[test]
    fn rejects_contained_window() {
        let held = vec![existing(9, 17, ReservationStatus::Approved)];
        let decision = validate(&candidate(10, 11, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::SlotConflict));
    }

    #[test]
    fn rejects_containing_window() {
        let held = vec![existing(10, 11, ReservationStatus::Approved)];
        let decision = validate(&candidate(9, 17, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::SlotConflict));
    }

    #[test]
    fn accepts_back_to_back_windows() {
        // [10, 12) and [12, 14) share only the instant 12:00, which belongs
        // to the later window
        let held = vec![existing(10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(12, 14, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Accepted);
    }

    #[test]
    fn ignores_rejected_reservations() {
        let held = vec![existing(10, 12, ReservationStatus::Rejected)];
        let decision = validate(&candidate(11, 13, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Accepted);
    }

    #[test]
    fn ignores_reservations_on_other_resources() {
        let held = vec![existing_on("court-2", 10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(11, 13, 3), &sample_resource(5), &held, at(8, 0));
        assert_eq!(decision, Decision::Accepted);
    }

    #[test]
    fn past_start_wins_over_every_other_rule() {
        // Candidate violates all four rules at once; the earliest rule reports
        let mut resource = sample_resource(2);
        resource.mark_unavailable();
        let held = vec![existing(10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(10, 12, 6), &resource, &held, at(11, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::PastStart));
    }

    #[test]
    fn capacity_wins_over_status_and_conflict() {
        let mut resource = sample_resource(2);
        resource.mark_unavailable();
        let held = vec![existing(10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(10, 12, 6), &resource, &held, at(8, 0));
        assert_eq!(decision, Decision::Rejected(RejectReason::CapacityExceeded));
    }

    #[test]
    fn unavailable_wins_over_conflict() {
        let mut resource = sample_resource(5);
        resource.mark_unavailable();
        let held = vec![existing(10, 12, ReservationStatus::Approved)];
        let decision = validate(&candidate(10, 12, 3), &resource, &held, at(8, 0));
        assert_eq!(
            decision,
            Decision::Rejected(RejectReason::ResourceUnavailable)
        );
    }

    #[test]
    fn repeated_validation_gives_same_decision() {
        let request = candidate(10, 12, 3);
        let resource = sample_resource(5);
        let held = vec![existing(11, 13, ReservationStatus::Pending)];
        let first = validate(&request, &resource, &held, at(8, 0));
        let second = validate(&request, &resource, &held, at(8, 0));
        assert_eq!(first, second);
        assert_eq!(first, Decision::Rejected(RejectReason::SlotConflict));
    }

    #[test]
    fn conflicting_reservations_lists_every_blocking_overlap() {
        let pending = existing(9, 10, ReservationStatus::Pending);
        let approved = existing(10, 11, ReservationStatus::Approved);
        let held = vec![
            pending.clone(),
            approved.clone(),
            existing(10, 12, ReservationStatus::Rejected),
            existing_on("court-2", 9, 12, ReservationStatus::Approved),
        ];
        let conflicts = conflicting_reservations(&candidate(9, 12, 2), &held);
        let ids: Vec<Uuid> = conflicts.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![pending.id, approved.id]);
    }

    #[test]
    fn conflicting_reservations_empty_for_free_window() {
        let held = vec![existing(9, 10, ReservationStatus::Approved)];
        let conflicts = conflicting_reservations(&candidate(10, 12, 2), &held);
        assert!(conflicts.is_empty());
    }

    #[test]
    fn court_booking_scenario() {
        // A day on one court: 09:00-10:00 approved, 14:00-15:00 pending.
        // The 10:00-11:00 gap right after the approved slot is bookable;
        // a half-hour shift back into it is not.
        let resource = sample_resource(10);
        let held = vec![
            existing(9, 10, ReservationStatus::Approved),
            existing(14, 15, ReservationStatus::Pending),
        ];

        let adjacent = validate(&candidate(10, 11, 4), &resource, &held, at(8, 0));
        assert_eq!(adjacent, Decision::Accepted);

        let shifted = BookingRequest::new(
            "court-1",
            BookingWindow::new(at(9, 30), at(10, 30)).unwrap(),
            4,
        )
        .unwrap();
        let overlapping = validate(&shifted, &resource, &held, at(8, 0));
        assert_eq!(overlapping, Decision::Rejected(RejectReason::SlotConflict));
    }
}
