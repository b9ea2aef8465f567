//! Menu Catalog API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{AvailabilityUpdate, MenuItem, MenuItemCreate, MenuItemUpdate};

/// GET /api/menu-items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_all(state.db.read()).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/available
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_available(state.db.read()).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/category/{category}
pub async fn list_by_category(
    State(state): State<ServerState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let items = menu_item::find_by_category(state.db.read(), &category).await?;
    Ok(Json(items))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Menu item {id} not found")))?;
    Ok(Json(item))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let item = menu_item::create(state.db.write(), payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let item = menu_item::update(state.db.write(), id, payload).await?;
    Ok(Json(item))
}

/// PATCH /api/menu-items/{id}/availability
pub async fn update_availability(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityUpdate>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::set_availability(state.db.write(), id, payload.is_available).await?;
    Ok(Json(item))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = menu_item::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Menu item {id} not found")));
    }
    Ok(Json(true))
}
