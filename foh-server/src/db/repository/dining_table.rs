//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus};
use sqlx::SqlitePool;

const TABLE_SELECT: &str = "SELECT id, table_number, capacity, status, location, description, created_at, updated_at FROM dining_table";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} ORDER BY table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql).fetch_all(pool).await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE id = ?");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, table_number: i32) -> RepoResult<Option<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE table_number = ? LIMIT 1");
    let table = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(table_number)
        .fetch_optional(pool)
        .await?;
    Ok(table)
}

pub async fn find_by_status(pool: &SqlitePool, status: TableStatus) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE status = ? ORDER BY table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_location(pool: &SqlitePool, location: &str) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE location = ? ORDER BY table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(location)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn find_by_min_capacity(pool: &SqlitePool, capacity: i32) -> RepoResult<Vec<DiningTable>> {
    let sql = format!("{TABLE_SELECT} WHERE capacity >= ? ORDER BY capacity, table_number");
    let tables = sqlx::query_as::<_, DiningTable>(&sql)
        .bind(capacity)
        .fetch_all(pool)
        .await?;
    Ok(tables)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if data.capacity < 1 {
        return Err(RepoError::Validation(format!(
            "Capacity must be at least 1, got {}",
            data.capacity
        )));
    }
    if find_by_number(pool, data.table_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table number {} already exists",
            data.table_number
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, table_number, capacity, status, location, description, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
    )
    .bind(id)
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(data.status.unwrap_or_default())
    .bind(&data.location)
    .bind(&data.description)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))?;

    if let Some(number) = data.table_number {
        if number != existing.table_number && find_by_number(pool, number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table number {number} already exists"
            )));
        }
    }
    if let Some(capacity) = data.capacity {
        if capacity < 1 {
            return Err(RepoError::Validation(format!(
                "Capacity must be at least 1, got {capacity}"
            )));
        }
    }

    let now = shared::util::now_millis();
    sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), capacity = COALESCE(?2, capacity), status = COALESCE(?3, status), location = COALESCE(?4, location), description = COALESCE(?5, description), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(data.status)
    .bind(&data.location)
    .bind(&data.description)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn set_status(pool: &SqlitePool, id: i64, status: TableStatus) -> RepoResult<DiningTable> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE dining_table SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Tables holding an active order must be released first
    let active: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM allocation WHERE kind = 'TABLE_ORDER' AND resource_id = ? AND status NOT IN ('COMPLETED', 'CANCELLED')",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    if active > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a table with active orders".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn test_pool() -> DbService {
        DbService::open_in_memory().await.unwrap()
    }

    fn table(number: i32, capacity: i32) -> DiningTableCreate {
        DiningTableCreate {
            table_number: number,
            capacity,
            status: None,
            location: Some("Main hall".into()),
            description: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_to_available() {
        let db = test_pool().await;
        let created = create(db.write(), table(1, 4)).await.unwrap();
        assert_eq!(created.table_number, 1);
        assert_eq!(created.status, TableStatus::Available);
    }

    #[tokio::test]
    async fn duplicate_table_number_is_rejected() {
        let db = test_pool().await;
        create(db.write(), table(7, 4)).await.unwrap();
        let err = create(db.write(), table(7, 2)).await.unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn renumbering_onto_a_taken_number_is_rejected() {
        let db = test_pool().await;
        create(db.write(), table(1, 4)).await.unwrap();
        let second = create(db.write(), table(2, 4)).await.unwrap();
        let err = update(
            db.write(),
            second.id,
            DiningTableUpdate {
                table_number: Some(1),
                capacity: None,
                status: None,
                location: None,
                description: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn set_status_round_trips() {
        let db = test_pool().await;
        let created = create(db.write(), table(3, 2)).await.unwrap();
        let updated = set_status(db.write(), created.id, TableStatus::OutOfService)
            .await
            .unwrap();
        assert_eq!(updated.status, TableStatus::OutOfService);
        let by_status = find_by_status(db.read(), TableStatus::OutOfService)
            .await
            .unwrap();
        assert_eq!(by_status.len(), 1);
    }
}
