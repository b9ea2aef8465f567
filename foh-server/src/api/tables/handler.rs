//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::validation::{MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult};
use shared::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableStatus, TableStatusUpdate,
};

/// GET /api/tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.db.read()).await?;
    Ok(Json(tables))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {id} not found")))?;
    Ok(Json(table))
}

/// GET /api/tables/number/{number}
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<i32>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::find_by_number(state.db.read(), number)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table number {number} not found")))?;
    Ok(Json(table))
}

/// GET /api/tables/status/{status}
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let status: TableStatus = status
        .parse()
        .map_err(|_| AppError::validation(format!("Unknown table status: {status}")))?;
    let tables = dining_table::find_by_status(state.db.read(), status).await?;
    Ok(Json(tables))
}

/// GET /api/tables/location/{location}
pub async fn list_by_location(
    State(state): State<ServerState>,
    Path(location): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_by_location(state.db.read(), &location).await?;
    Ok(Json(tables))
}

/// GET /api/tables/capacity/{capacity}
pub async fn list_by_min_capacity(
    State(state): State<ServerState>,
    Path(capacity): Path<i32>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_by_min_capacity(state.db.read(), capacity).await?;
    Ok(Json(tables))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let table = dining_table::create(state.db.write(), payload).await?;
    Ok(Json(table))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    validate_optional_text(&payload.location, "location", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    let table = dining_table::update(state.db.write(), id, payload).await?;
    Ok(Json(table))
}

/// PATCH /api/tables/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<TableStatusUpdate>,
) -> AppResult<Json<DiningTable>> {
    let table = dining_table::set_status(state.db.write(), id, payload.status).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = dining_table::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Table {id} not found")));
    }
    Ok(Json(true))
}
