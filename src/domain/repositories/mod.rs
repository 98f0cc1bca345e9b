//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations (re-exported
//!   from `domain::error`)

use super::reservation::ReservationRepository;
use super::resource::ResourceRepository;

pub use super::error::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let resource = repos.resources().find_by_id("court-1").await?;
///     let held = repos.reservations().find_for_resource("court-1", None).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn resources(&self) -> &dyn ResourceRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
}
