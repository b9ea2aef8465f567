//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

const MENU_SELECT: &str = "SELECT id, name, description, price, category, is_available, preparation_minutes, image_url, ingredients, created_at, updated_at FROM menu_item";

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(RepoError::Validation(format!(
            "Price must be positive, got {price}"
        )));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} ORDER BY category, name");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE id = ?");
    let item = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(item)
}

pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE is_available = 1 ORDER BY category, name");
    let items = sqlx::query_as::<_, MenuItem>(&sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_category(pool: &SqlitePool, category: &str) -> RepoResult<Vec<MenuItem>> {
    let sql = format!("{MENU_SELECT} WHERE category = ? COLLATE NOCASE ORDER BY name");
    let items = sqlx::query_as::<_, MenuItem>(&sql)
        .bind(category)
        .fetch_all(pool)
        .await?;
    Ok(items)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    validate_price(data.price)?;

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, category, is_available, preparation_minutes, image_url, ingredients, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available.unwrap_or(true))
    .bind(data.preparation_minutes)
    .bind(&data.image_url)
    .bind(&data.ingredients)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    if let Some(price) = data.price {
        validate_price(price)?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), category = COALESCE(?4, category), is_available = COALESCE(?5, is_available), preparation_minutes = COALESCE(?6, preparation_minutes), image_url = COALESCE(?7, image_url), ingredients = COALESCE(?8, ingredients), updated_at = ?9 WHERE id = ?10",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(data.is_available)
    .bind(data.preparation_minutes)
    .bind(&data.image_url)
    .bind(&data.ingredients)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn set_availability(pool: &SqlitePool, id: i64, is_available: bool) -> RepoResult<MenuItem> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE menu_item SET is_available = ?, updated_at = ? WHERE id = ?")
        .bind(is_available)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    // Line items keep their snapshot but the FK still points here
    let referenced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM allocation_item WHERE menu_item_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;
    if referenced > 0 {
        return Err(RepoError::Validation(
            "Cannot delete a menu item referenced by orders; mark it unavailable instead".into(),
        ));
    }

    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    fn burger() -> MenuItemCreate {
        MenuItemCreate {
            name: "Burger".into(),
            description: None,
            price: 850.0,
            category: "MAINS".into(),
            is_available: None,
            preparation_minutes: Some(15),
            image_url: None,
            ingredients: None,
        }
    }

    #[tokio::test]
    async fn non_positive_price_is_rejected() {
        let db = DbService::open_in_memory().await.unwrap();
        let err = create(db.write(), MenuItemCreate { price: 0.0, ..burger() })
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[tokio::test]
    async fn availability_filter_tracks_toggle() {
        let db = DbService::open_in_memory().await.unwrap();
        let item = create(db.write(), burger()).await.unwrap();
        assert!(item.is_available);
        assert_eq!(find_available(db.read()).await.unwrap().len(), 1);

        set_availability(db.write(), item.id, false).await.unwrap();
        assert!(find_available(db.read()).await.unwrap().is_empty());
    }
}
