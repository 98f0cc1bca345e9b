//! HTTP API modules, one per concern

pub mod health;
pub mod metrics;
pub mod reservations;
pub mod resources;
