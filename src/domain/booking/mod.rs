//! Booking core: value types, input normalization, and validation rules

pub mod error;
pub mod request;
pub mod schedule;
pub mod validator;
pub mod window;

pub use error::BookingError;
pub use request::BookingRequest;
pub use validator::{conflicting_reservations, validate, Decision, RejectReason};
pub use window::BookingWindow;
