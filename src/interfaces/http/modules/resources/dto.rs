//! Resource DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Resource;

/// Request to register a new bookable resource
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateResourceRequest {
    /// Unique resource ID (e.g. "court-1")
    #[validate(length(min = 1, max = 64))]
    pub id: String,
    /// Human-readable name
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Largest occupancy a single reservation may request
    #[validate(range(min = 1))]
    pub capacity: u32,
}

/// Request to change a resource's availability status
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateResourceStatusRequest {
    /// New status: "available" or "unavailable"
    #[validate(length(min = 1))]
    pub status: String,
}

/// Resource details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ResourceDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub capacity: u32,
    pub status: String,
    pub created_at: String,
}

impl ResourceDto {
    pub fn from_domain(resource: &Resource) -> Self {
        Self {
            id: resource.id.clone(),
            name: resource.name.clone(),
            description: resource.description.clone(),
            capacity: resource.capacity,
            status: resource.status.as_str().to_string(),
            created_at: resource.created_at.to_rfc3339(),
        }
    }
}
