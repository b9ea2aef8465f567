//! Menu Item Model (priced catalog)

use serde::{Deserialize, Serialize};

/// Menu item entity
///
/// The catalog is the pricing source for new order lines only; once a line
/// item snapshots `price`, later catalog edits never touch it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Price in currency units
    pub price: f64,
    pub category: String,
    pub is_available: bool,
    pub preparation_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub is_available: Option<bool>,
    pub preparation_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub ingredients: Option<String>,
}

/// Update availability payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityUpdate {
    pub is_available: bool,
}
