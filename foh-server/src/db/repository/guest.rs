//! Guest Repository

use super::{RepoError, RepoResult};
use shared::models::{Guest, GuestCreate, GuestUpdate};
use sqlx::SqlitePool;

const GUEST_SELECT: &str = "SELECT id, first_name, last_name, phone, nic, email, created_at, updated_at FROM guest";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Guest>> {
    let sql = format!("{GUEST_SELECT} ORDER BY last_name, first_name");
    let guests = sqlx::query_as::<_, Guest>(&sql).fetch_all(pool).await?;
    Ok(guests)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Guest>> {
    let sql = format!("{GUEST_SELECT} WHERE id = ?");
    let guest = sqlx::query_as::<_, Guest>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(guest)
}

pub async fn search(pool: &SqlitePool, query: &str) -> RepoResult<Vec<Guest>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{GUEST_SELECT} WHERE first_name LIKE ?1 OR last_name LIKE ?1 OR phone LIKE ?1 OR nic LIKE ?1 ORDER BY last_name, first_name"
    );
    let guests = sqlx::query_as::<_, Guest>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(guests)
}

async fn check_unique_contact(
    pool: &SqlitePool,
    phone: &Option<String>,
    nic: &Option<String>,
    exclude_id: Option<i64>,
) -> RepoResult<()> {
    let taken: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM guest WHERE ((?1 IS NOT NULL AND phone = ?1) OR (?2 IS NOT NULL AND nic = ?2)) AND id != COALESCE(?3, -1)",
    )
    .bind(phone)
    .bind(nic)
    .bind(exclude_id)
    .fetch_one(pool)
    .await?;
    if taken > 0 {
        return Err(RepoError::Duplicate(
            "A guest with this phone or NIC already exists".into(),
        ));
    }
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: GuestCreate) -> RepoResult<Guest> {
    check_unique_contact(pool, &data.phone, &data.nic, None).await?;

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO guest (id, first_name, last_name, phone, nic, email, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.nic)
    .bind(&data.email)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create guest".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: GuestUpdate) -> RepoResult<Guest> {
    if find_by_id(pool, id).await?.is_none() {
        return Err(RepoError::NotFound(format!("Guest {id} not found")));
    }
    if data.phone.is_some() || data.nic.is_some() {
        check_unique_contact(pool, &data.phone, &data.nic, Some(id)).await?;
    }

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE guest SET first_name = COALESCE(?1, first_name), last_name = COALESCE(?2, last_name), phone = COALESCE(?3, phone), nic = COALESCE(?4, nic), email = COALESCE(?5, email), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.phone)
    .bind(&data.nic)
    .bind(&data.email)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Guest {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM guest WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
