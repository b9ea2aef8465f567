//! Venue Repository

use super::{RepoError, RepoResult};
use shared::models::{Venue, VenueCreate, VenueStatus, VenueUpdate};
use sqlx::SqlitePool;

const VENUE_SELECT: &str = "SELECT id, name, capacity, price_per_hour, status, created_at, updated_at FROM venue";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Venue>> {
    let sql = format!("{VENUE_SELECT} ORDER BY name");
    let venues = sqlx::query_as::<_, Venue>(&sql).fetch_all(pool).await?;
    Ok(venues)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Venue>> {
    let sql = format!("{VENUE_SELECT} WHERE id = ?");
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(venue)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Venue>> {
    let sql = format!("{VENUE_SELECT} WHERE name = ? LIMIT 1");
    let venue = sqlx::query_as::<_, Venue>(&sql)
        .bind(name)
        .fetch_optional(pool)
        .await?;
    Ok(venue)
}

pub async fn create(pool: &SqlitePool, data: VenueCreate) -> RepoResult<Venue> {
    if data.capacity < 1 {
        return Err(RepoError::Validation(format!(
            "Capacity must be at least 1, got {}",
            data.capacity
        )));
    }
    if find_by_name(pool, &data.name).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Venue '{}' already exists",
            data.name
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO venue (id, name, capacity, price_per_hour, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.price_per_hour.unwrap_or(0.0))
    .bind(VenueStatus::Available)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create venue".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: VenueUpdate) -> RepoResult<Venue> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Venue {id} not found")))?;

    if let Some(name) = &data.name {
        if name != &existing.name && find_by_name(pool, name).await?.is_some() {
            return Err(RepoError::Duplicate(format!("Venue '{name}' already exists")));
        }
    }

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE venue SET name = COALESCE(?1, name), capacity = COALESCE(?2, capacity), price_per_hour = COALESCE(?3, price_per_hour), status = COALESCE(?4, status), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(data.capacity)
    .bind(data.price_per_hour)
    .bind(data.status)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Venue {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Venues with live bookings must be cancelled out first
    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM allocation WHERE kind = 'VENUE_EVENT' AND resource_id = ? AND status NOT IN ('COMPLETED', 'CANCELLED')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a venue with active bookings".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM venue WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
