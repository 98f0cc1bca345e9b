//! # Rentora Booking Service
//!
//! Reservation system for shared resources (courts, rooms, equipment) built
//! around a pure booking validator with a fixed rule order.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the booking validator and repository traits
//! - **application**: Business services (booking decisions, housekeeping)
//! - **infrastructure**: Storage backends (thread-safe in-memory store)
//! - **interfaces**: REST API with Swagger documentation and Prometheus metrics
//! - **shared**: Cross-cutting concerns (graceful shutdown)

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export core domain types for easy access
pub use domain::{
    validate, BookingRequest, BookingWindow, Decision, InsertOutcome, RejectReason,
    RepositoryProvider, Reservation, ReservationStatus, Resource, ResourceStatus,
};

// Re-export storage backend
pub use infrastructure::InMemoryStore;

// Re-export application services
pub use application::services::{start_housekeeping_task, BookingService};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export shutdown plumbing
pub use shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
