//! Inventory Item Repository

use super::{RepoError, RepoResult};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use sqlx::SqlitePool;

const ITEM_SELECT: &str = "SELECT id, name, category, quantity, low_stock, created_at, updated_at FROM inventory_item";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let sql = format!("{ITEM_SELECT} ORDER BY category, name");
    let items = sqlx::query_as::<_, InventoryItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<InventoryItem>> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, InventoryItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_low_stock(pool: &SqlitePool) -> RepoResult<Vec<InventoryItem>> {
    let sql = format!("{ITEM_SELECT} WHERE quantity <= low_stock ORDER BY category, name");
    let items = sqlx::query_as::<_, InventoryItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn search(pool: &SqlitePool, keyword: &str) -> RepoResult<Vec<InventoryItem>> {
    let pattern = format!("%{keyword}%");
    let sql = format!("{ITEM_SELECT} WHERE name LIKE ?1 OR category LIKE ?1 ORDER BY category, name");
    let items = sqlx::query_as::<_, InventoryItem>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: InventoryItemCreate) -> RepoResult<InventoryItem> {
    let quantity = data.quantity.unwrap_or(0);
    if quantity < 0 {
        return Err(RepoError::Validation(format!(
            "Quantity cannot be negative: {quantity}"
        )));
    }

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO inventory_item (id, name, category, quantity, low_stock, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.category)
    .bind(quantity)
    .bind(data.low_stock.unwrap_or(0))
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create inventory item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: InventoryItemUpdate) -> RepoResult<InventoryItem> {
    if let Some(quantity) = data.quantity {
        if quantity < 0 {
            return Err(RepoError::Validation(format!(
                "Quantity cannot be negative: {quantity}"
            )));
        }
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET name = COALESCE(?1, name), category = COALESCE(?2, category), quantity = COALESCE(?3, quantity), low_stock = COALESCE(?4, low_stock), updated_at = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.category)
    .bind(data.quantity)
    .bind(data.low_stock)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

/// Consume stock. The decrement is guarded in the statement itself, so a
/// concurrent consumer can never drive the count negative.
pub async fn use_stock(pool: &SqlitePool, id: i64, amount: i32) -> RepoResult<InventoryItem> {
    if amount <= 0 {
        return Err(RepoError::Validation(format!(
            "Amount must be greater than zero, got {amount}"
        )));
    }
    let item = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))?;

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET quantity = quantity - ?1, updated_at = ?2 WHERE id = ?3 AND quantity >= ?1",
    )
    .bind(amount)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Validation(format!(
            "Not enough stock for '{}' ({} on hand, {} requested)",
            item.name, item.quantity, amount
        )));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

pub async fn restock(pool: &SqlitePool, id: i64, amount: i32) -> RepoResult<InventoryItem> {
    if amount <= 0 {
        return Err(RepoError::Validation(format!(
            "Restock amount must be greater than zero, got {amount}"
        )));
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE inventory_item SET quantity = quantity + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(amount)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Inventory item {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Inventory item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM inventory_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    async fn seed(db: &DbService, quantity: i32, low_stock: i32) -> InventoryItem {
        create(
            db.write(),
            InventoryItemCreate {
                name: "Flour".into(),
                category: "DRY_GOODS".into(),
                quantity: Some(quantity),
                low_stock: Some(low_stock),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn consuming_more_than_on_hand_is_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        let item = seed(&db, 5, 2).await;

        let err = use_stock(db.write(), item.id, 6).await.unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        // The failed consume must not have touched the count
        let unchanged = find_by_id(db.read(), item.id).await.unwrap().unwrap();
        assert_eq!(unchanged.quantity, 5);
    }

    #[tokio::test]
    async fn consume_then_restock_round_trips() {
        let db = DbService::open_in_memory().await.unwrap();
        let item = seed(&db, 10, 3).await;

        let after_use = use_stock(db.write(), item.id, 8).await.unwrap();
        assert_eq!(after_use.quantity, 2);
        assert_eq!(find_low_stock(db.read()).await.unwrap().len(), 1);

        let after_restock = restock(db.write(), item.id, 8).await.unwrap();
        assert_eq!(after_restock.quantity, 10);
        assert!(find_low_stock(db.read()).await.unwrap().is_empty());
    }
}
