//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::inventory_item;
use crate::utils::validation::{MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{InventoryItem, InventoryItemCreate, InventoryItemUpdate, StockAmount};

/// GET /api/inventory
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = inventory_item::find_all(state.db.read()).await?;
    Ok(Json(items))
}

/// GET /api/inventory/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory_item::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {id} not found")))?;
    Ok(Json(item))
}

/// GET /api/inventory/low-stock
pub async fn list_low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = inventory_item::find_low_stock(state.db.read()).await?;
    Ok(Json(items))
}

/// GET /api/inventory/search/{keyword}
pub async fn search(
    State(state): State<ServerState>,
    Path(keyword): Path<String>,
) -> AppResult<Json<Vec<InventoryItem>>> {
    let items = inventory_item::search(state.db.read(), &keyword).await?;
    Ok(Json(items))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<Json<InventoryItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    let item = inventory_item::create(state.db.write(), payload).await?;
    Ok(Json(item))
}

/// PUT /api/inventory/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory_item::update(state.db.write(), id, payload).await?;
    Ok(Json(item))
}

/// POST /api/inventory/{id}/use
pub async fn use_stock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAmount>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory_item::use_stock(state.db.write(), id, payload.amount).await?;
    Ok(Json(item))
}

/// POST /api/inventory/{id}/restock
pub async fn restock(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StockAmount>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory_item::restock(state.db.write(), id, payload.amount).await?;
    Ok(Json(item))
}

/// DELETE /api/inventory/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = inventory_item::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Inventory item {id} not found")));
    }
    Ok(Json(true))
}
