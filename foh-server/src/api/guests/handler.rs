//! Guest Registry API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::guest;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Guest, GuestCreate, GuestUpdate};

/// GET /api/guests
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Guest>>> {
    let guests = guest::find_all(state.db.read()).await?;
    Ok(Json(guests))
}

/// GET /api/guests/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Guest>> {
    let guest = guest::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Guest {id} not found")))?;
    Ok(Json(guest))
}

/// GET /api/guests/search/{query}
pub async fn search(
    State(state): State<ServerState>,
    Path(query): Path<String>,
) -> AppResult<Json<Vec<Guest>>> {
    let guests = guest::search(state.db.read(), &query).await?;
    Ok(Json(guests))
}

/// POST /api/guests
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<GuestCreate>,
) -> AppResult<Json<Guest>> {
    validate_required_text(&payload.first_name, "first_name", MAX_NAME_LEN)?;
    validate_required_text(&payload.last_name, "last_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.nic, "nic", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    let guest = guest::create(state.db.write(), payload).await?;
    Ok(Json(guest))
}

/// PUT /api/guests/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<GuestUpdate>,
) -> AppResult<Json<Guest>> {
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.nic, "nic", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    let guest = guest::update(state.db.write(), id, payload).await?;
    Ok(Json(guest))
}

/// DELETE /api/guests/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = guest::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Guest {id} not found")));
    }
    Ok(Json(true))
}
