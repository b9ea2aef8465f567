//! Venue API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::venue;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{Venue, VenueCreate, VenueUpdate};

/// GET /api/venues
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Venue>>> {
    let venues = venue::find_all(state.db.read()).await?;
    Ok(Json(venues))
}

/// GET /api/venues/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Venue>> {
    let venue = venue::find_by_id(state.db.read(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Venue {id} not found")))?;
    Ok(Json(venue))
}

/// POST /api/venues
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<VenueCreate>,
) -> AppResult<Json<Venue>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let venue = venue::create(state.db.write(), payload).await?;
    Ok(Json(venue))
}

/// PUT /api/venues/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<VenueUpdate>,
) -> AppResult<Json<Venue>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let venue = venue::update(state.db.write(), id, payload).await?;
    Ok(Json(venue))
}

/// DELETE /api/venues/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = venue::delete(state.db.write(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Venue {id} not found")));
    }
    Ok(Json(true))
}
