//! Bookable resource domain entity

use chrono::{DateTime, Utc};

/// Resource availability status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceStatus {
    /// Resource accepts new reservations
    Available,
    /// Resource is closed for booking (maintenance, blocked by an operator)
    Unavailable,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Unavailable => "unavailable",
        }
    }

    /// Parses a wire value. Unknown strings are rejected rather than coerced.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "unavailable" => Some(Self::Unavailable),
            _ => None,
        }
    }
}

impl std::fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A bookable resource (room, desk, court, vehicle)
#[derive(Debug, Clone)]
pub struct Resource {
    /// Unique resource ID
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Largest occupancy a single reservation may request
    pub capacity: u32,
    /// Current availability status
    pub status: ResourceStatus,
    /// When the resource was registered
    pub created_at: DateTime<Utc>,
}

impl Resource {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: Option<String>,
        capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description,
            capacity,
            status: ResourceStatus::Available,
            created_at: Utc::now(),
        }
    }

    /// Check if the resource currently accepts reservations
    pub fn is_available(&self) -> bool {
        self.status == ResourceStatus::Available
    }

    /// Take the resource offline
    pub fn mark_unavailable(&mut self) {
        self.status = ResourceStatus::Unavailable;
    }

    /// Bring the resource back online
    pub fn mark_available(&mut self) {
        self.status = ResourceStatus::Available;
    }
}

// ── Tests ──────────────────────────────────────────────────────
