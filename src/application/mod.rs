//! Application layer: services orchestrating domain and storage

pub mod services;

pub use services::{AvailabilityReport, BookingService};
