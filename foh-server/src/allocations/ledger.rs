//! Line-Item Ledger
//!
//! Owns line-item arithmetic and total recomputation. `recompute_total`
//! is the only code path that writes `total_amount`; every mutator calls
//! it on the same transaction as the item write, so a committed aggregate
//! always carries a total equal to the sum of its live items.

use sqlx::SqliteConnection;

use super::AllocationError;
use super::money;
use shared::models::{AllocationItem, MenuItem};
use shared::util::{now_millis, snowflake_id};

const ITEM_SELECT: &str = "SELECT id, allocation_id, menu_item_id, name, unit_price, quantity, subtotal, special_requests, created_at, updated_at FROM allocation_item";

pub(super) async fn find_item(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<AllocationItem>, AllocationError> {
    let sql = format!("{ITEM_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, AllocationItem>(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(item)
}

pub(super) async fn items_for(
    conn: &mut SqliteConnection,
    allocation_id: i64,
) -> Result<Vec<AllocationItem>, AllocationError> {
    let sql = format!("{ITEM_SELECT} WHERE allocation_id = ? ORDER BY id");
    let items = sqlx::query_as::<_, AllocationItem>(&sql)
        .bind(allocation_id)
        .fetch_all(&mut *conn)
        .await?;
    Ok(items)
}

/// Insert a line item, snapshotting the catalog name and price. The
/// snapshot is what the customer was quoted; later catalog edits must
/// never touch it.
pub(super) async fn insert_item(
    conn: &mut SqliteConnection,
    allocation_id: i64,
    menu_item_id: i64,
    quantity: i32,
    special_requests: Option<&str>,
) -> Result<AllocationItem, AllocationError> {
    money::validate_quantity(quantity)?;

    let menu_item: Option<MenuItem> = sqlx::query_as(
        "SELECT id, name, description, price, category, is_available, preparation_minutes, image_url, ingredients, created_at, updated_at FROM menu_item WHERE id = ?",
    )
    .bind(menu_item_id)
    .fetch_optional(&mut *conn)
    .await?;
    let menu_item = menu_item.ok_or(AllocationError::MenuItemNotFound(menu_item_id))?;
    if !menu_item.is_available {
        return Err(AllocationError::MenuItemUnavailable(menu_item.name));
    }

    let subtotal = money::line_subtotal(menu_item.price, quantity);
    let now = now_millis();
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO allocation_item (id, allocation_id, menu_item_id, name, unit_price, quantity, subtotal, special_requests, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(allocation_id)
    .bind(menu_item.id)
    .bind(&menu_item.name)
    .bind(menu_item.price)
    .bind(quantity)
    .bind(subtotal)
    .bind(special_requests)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    find_item(conn, id)
        .await?
        .ok_or(AllocationError::Storage(sqlx::Error::RowNotFound))
}

/// Update quantity, recomputing the subtotal from the snapshotted unit
/// price only
pub(super) async fn update_item_quantity(
    conn: &mut SqliteConnection,
    item_id: i64,
    quantity: i32,
) -> Result<AllocationItem, AllocationError> {
    money::validate_quantity(quantity)?;

    let item = find_item(conn, item_id)
        .await?
        .ok_or(AllocationError::ItemNotFound(item_id))?;

    let subtotal = money::line_subtotal(item.unit_price, quantity);
    sqlx::query("UPDATE allocation_item SET quantity = ?, subtotal = ?, updated_at = ? WHERE id = ?")
        .bind(quantity)
        .bind(subtotal)
        .bind(now_millis())
        .bind(item_id)
        .execute(&mut *conn)
        .await?;

    find_item(conn, item_id)
        .await?
        .ok_or(AllocationError::ItemNotFound(item_id))
}

/// Remove a line item, returning the removed row so the caller knows
/// which aggregate to recompute
pub(super) async fn delete_item(
    conn: &mut SqliteConnection,
    item_id: i64,
) -> Result<AllocationItem, AllocationError> {
    let item = find_item(conn, item_id)
        .await?
        .ok_or(AllocationError::ItemNotFound(item_id))?;

    sqlx::query("DELETE FROM allocation_item WHERE id = ?")
        .bind(item_id)
        .execute(&mut *conn)
        .await?;
    Ok(item)
}

/// Recompute and persist the aggregate total from its live items, and
/// stamp `updated_at`. Must run inside the same transaction as the item
/// mutation that made it necessary.
pub(super) async fn recompute_total(
    conn: &mut SqliteConnection,
    allocation_id: i64,
) -> Result<f64, AllocationError> {
    let lines: Vec<(f64, i32)> =
        sqlx::query_as("SELECT unit_price, quantity FROM allocation_item WHERE allocation_id = ?")
            .bind(allocation_id)
            .fetch_all(&mut *conn)
            .await?;

    let total = money::sum_lines(&lines);
    sqlx::query("UPDATE allocation SET total_amount = ?, updated_at = ? WHERE id = ?")
        .bind(total)
        .bind(now_millis())
        .bind(allocation_id)
        .execute(&mut *conn)
        .await?;
    Ok(total)
}
