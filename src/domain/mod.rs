//! Domain layer: value types, entities, validation rules, repository traits

pub mod booking;
pub mod error;
pub mod repositories;
pub mod reservation;
pub mod resource;

// Re-export commonly used types
pub use booking::{validate, BookingError, BookingRequest, BookingWindow, Decision, RejectReason};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
pub use reservation::{InsertOutcome, Reservation, ReservationRepository, ReservationStatus};
pub use resource::{Resource, ResourceRepository, ResourceStatus};
