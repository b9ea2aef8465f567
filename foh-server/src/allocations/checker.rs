//! Allocation Checker
//!
//! Decides whether a requested allocation is legal before the aggregate
//! row is inserted: resource exists, capacity suffices, resource is in
//! service, and (for venue events) the date slot is free. Runs on the same
//! transaction as the insert so the check-then-create pair cannot race.

use chrono::NaiveDate;
use sqlx::SqliteConnection;

use super::AllocationError;
use super::service::AllocationTarget;
use shared::models::{DiningTable, TableStatus, Venue, VenueStatus};

pub(super) async fn check_target(
    conn: &mut SqliteConnection,
    target: &AllocationTarget,
    party_size: Option<i32>,
) -> Result<(), AllocationError> {
    match target {
        AllocationTarget::Table { table_id } => check_table(conn, *table_id, party_size).await,
        AllocationTarget::Venue { venue_id, date } => {
            check_venue(conn, *venue_id, *date, party_size).await
        }
    }
}

async fn check_table(
    conn: &mut SqliteConnection,
    table_id: i64,
    party_size: Option<i32>,
) -> Result<(), AllocationError> {
    let table: Option<DiningTable> = sqlx::query_as(
        "SELECT id, table_number, capacity, status, location, description, created_at, updated_at FROM dining_table WHERE id = ?",
    )
    .bind(table_id)
    .fetch_optional(&mut *conn)
    .await?;
    let table = table.ok_or(AllocationError::ResourceNotFound {
        kind: "Table",
        id: table_id,
    })?;

    if let Some(size) = party_size {
        if size > table.capacity {
            return Err(AllocationError::CapacityExceeded {
                requested: size,
                capacity: table.capacity,
            });
        }
    }

    // Occupancy is status-based: only an AVAILABLE table can be seated
    match table.status {
        TableStatus::Available => Ok(()),
        TableStatus::OutOfService => Err(AllocationError::ResourceUnavailable(format!(
            "Table {} is out of service",
            table.table_number
        ))),
        TableStatus::Occupied | TableStatus::Reserved => {
            Err(AllocationError::ResourceUnavailable(format!(
                "Table {} is not available",
                table.table_number
            )))
        }
    }
}

async fn check_venue(
    conn: &mut SqliteConnection,
    venue_id: i64,
    date: NaiveDate,
    party_size: Option<i32>,
) -> Result<(), AllocationError> {
    let venue: Option<Venue> = sqlx::query_as(
        "SELECT id, name, capacity, price_per_hour, status, created_at, updated_at FROM venue WHERE id = ?",
    )
    .bind(venue_id)
    .fetch_optional(&mut *conn)
    .await?;
    let venue = venue.ok_or(AllocationError::ResourceNotFound {
        kind: "Venue",
        id: venue_id,
    })?;

    if let Some(size) = party_size {
        if size > venue.capacity {
            return Err(AllocationError::CapacityExceeded {
                requested: size,
                capacity: venue.capacity,
            });
        }
    }

    if venue.status == VenueStatus::OutOfService {
        return Err(AllocationError::ResourceUnavailable(format!(
            "Venue '{}' is out of service",
            venue.name
        )));
    }

    // Cancelled bookings release the slot; anything else holds it
    let existing: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM allocation WHERE kind = 'VENUE_EVENT' AND resource_id = ? AND window_date = ? AND status != 'CANCELLED'",
    )
    .bind(venue_id)
    .bind(date.to_string())
    .fetch_one(&mut *conn)
    .await?;
    if existing > 0 {
        return Err(AllocationError::SlotAlreadyBooked {
            venue_id,
            date: date.to_string(),
        });
    }

    Ok(())
}
