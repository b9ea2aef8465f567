//! Inventory Item Model (stock counts)

use serde::{Deserialize, Serialize};

/// Inventory item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    /// Units on hand, never negative
    pub quantity: i32,
    /// Reorder threshold
    pub low_stock: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub category: String,
    pub quantity: Option<i32>,
    pub low_stock: Option<i32>,
}

/// Update inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<i32>,
    pub low_stock: Option<i32>,
}

/// Consume / restock payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAmount {
    pub amount: i32,
}
