//! Venue Model

use serde::{Deserialize, Serialize};

/// Venue status. Per-date occupancy is tracked on the allocations table,
/// not here; this flag only takes a venue out of rotation entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum VenueStatus {
    #[default]
    Available,
    OutOfService,
}

/// Venue entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Venue {
    pub id: i64,
    /// Human key, unique among venues
    pub name: String,
    /// Attendee limit
    pub capacity: i32,
    pub price_per_hour: f64,
    pub status: VenueStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCreate {
    pub name: String,
    pub capacity: i32,
    pub price_per_hour: Option<f64>,
}

/// Update venue payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueUpdate {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub price_per_hour: Option<f64>,
    pub status: Option<VenueStatus>,
}
