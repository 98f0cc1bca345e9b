//! Resource repository interface

use async_trait::async_trait;

use super::model::{Resource, ResourceStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Save a new resource
    async fn save(&self, resource: Resource) -> DomainResult<()>;

    /// Find resource by ID
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Resource>>;

    /// Find all registered resources
    async fn find_all(&self) -> DomainResult<Vec<Resource>>;

    /// Change a resource's availability status, returning the updated resource
    async fn set_status(&self, id: &str, status: ResourceStatus) -> DomainResult<Resource>;

    /// Remove a resource and every reservation attached to it
    async fn delete(&self, id: &str) -> DomainResult<()>;

    /// Count registered resources
    async fn count(&self) -> DomainResult<usize>;
}
