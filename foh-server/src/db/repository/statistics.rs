//! Statistics Repository (dashboard counters)

use super::RepoResult;
use shared::models::FohStatistics;
use sqlx::SqlitePool;

async fn count(pool: &SqlitePool, sql: &str) -> RepoResult<i64> {
    let n: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
    Ok(n)
}

pub async fn overview(pool: &SqlitePool) -> RepoResult<FohStatistics> {
    let total_menu_items = count(pool, "SELECT COUNT(*) FROM menu_item").await?;
    let available_menu_items =
        count(pool, "SELECT COUNT(*) FROM menu_item WHERE is_available = 1").await?;
    let total_tables = count(pool, "SELECT COUNT(*) FROM dining_table").await?;
    let available_tables = count(
        pool,
        "SELECT COUNT(*) FROM dining_table WHERE status = 'AVAILABLE'",
    )
    .await?;
    let occupied_tables = count(
        pool,
        "SELECT COUNT(*) FROM dining_table WHERE status = 'OCCUPIED'",
    )
    .await?;
    let total_orders = count(
        pool,
        "SELECT COUNT(*) FROM allocation WHERE kind = 'TABLE_ORDER'",
    )
    .await?;
    let pending_orders = count(
        pool,
        "SELECT COUNT(*) FROM allocation WHERE kind = 'TABLE_ORDER' AND status = 'PENDING'",
    )
    .await?;
    let active_orders = count(
        pool,
        "SELECT COUNT(*) FROM allocation WHERE kind = 'TABLE_ORDER' AND status NOT IN ('COMPLETED', 'CANCELLED')",
    )
    .await?;
    let total_bookings = count(
        pool,
        "SELECT COUNT(*) FROM allocation WHERE kind = 'VENUE_EVENT'",
    )
    .await?;
    let confirmed_bookings = count(
        pool,
        "SELECT COUNT(*) FROM allocation WHERE kind = 'VENUE_EVENT' AND status = 'CONFIRMED'",
    )
    .await?;

    let total_revenue: Option<f64> = sqlx::query_scalar(
        "SELECT SUM(total_amount) FROM allocation WHERE status != 'CANCELLED'",
    )
    .fetch_one(pool)
    .await?;

    Ok(FohStatistics {
        total_menu_items,
        available_menu_items,
        total_tables,
        available_tables,
        occupied_tables,
        total_orders,
        pending_orders,
        active_orders,
        total_bookings,
        confirmed_bookings,
        total_revenue: total_revenue.unwrap_or(0.0),
    })
}
