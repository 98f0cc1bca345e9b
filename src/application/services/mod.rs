//! Application services

pub mod booking;
pub mod housekeeping;

pub use booking::{AvailabilityReport, BookingService};
pub use housekeeping::start_housekeeping_task;
