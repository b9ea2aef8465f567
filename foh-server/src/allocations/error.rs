//! Allocation Engine Errors

use shared::models::AllocationStatus;
use thiserror::Error;

/// Everything the engine can refuse or fail with. Validation and conflict
/// variants are raised before any row is written; `Storage` mid-operation
/// rolls the surrounding transaction back.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("{kind} {id} not found")]
    ResourceNotFound { kind: &'static str, id: i64 },

    #[error("Party of {requested} exceeds capacity {capacity}")]
    CapacityExceeded { requested: i32, capacity: i32 },

    #[error("{0}")]
    ResourceUnavailable(String),

    #[error("Venue {venue_id} is already booked on {date}")]
    SlotAlreadyBooked { venue_id: i64, date: String },

    #[error("Illegal status transition {from} -> {to}")]
    IllegalTransition {
        from: AllocationStatus,
        to: AllocationStatus,
    },

    #[error("Allocation {0} not found")]
    NotFound(i64),

    #[error("No allocation with reference {0}")]
    ReferenceNotFound(String),

    #[error("Line item {0} not found")]
    ItemNotFound(i64),

    #[error("Menu item {0} not found")]
    MenuItemNotFound(i64),

    #[error("Menu item '{0}' is not available")]
    MenuItemUnavailable(String),

    #[error("Quantity must be at least 1, got {0}")]
    InvalidQuantity(i32),

    #[error("{0}")]
    InvalidInput(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
