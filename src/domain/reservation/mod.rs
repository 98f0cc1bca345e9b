//! Reservation domain module

pub mod model;
pub mod repository;

pub use model::{Reservation, ReservationStatus};
pub use repository::{InsertOutcome, ReservationRepository};
