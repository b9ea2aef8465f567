//! Venue Booking API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::allocations::{AllocationTarget, CreateAllocation};
use crate::core::ServerState;
use crate::utils::time::parse_date;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{AllocationKind, AllocationStatusUpdate, AllocationView, BookingCreate};

fn ensure_booking(view: AllocationView) -> AppResult<AllocationView> {
    if view.allocation.kind != AllocationKind::VenueEvent {
        return Err(AppError::not_found(format!(
            "Booking {} not found",
            view.allocation.id
        )));
    }
    Ok(view)
}

/// POST /api/bookings
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<AllocationView>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    let date = parse_date(&payload.event_date)?;

    let view = state
        .allocations
        .create(CreateAllocation {
            target: AllocationTarget::Venue {
                venue_id: payload.venue_id,
                date,
            },
            customer_name: Some(payload.customer_name),
            party_size: Some(payload.attendees),
            special_instructions: None,
            items: Vec::new(),
        })
        .await?;
    Ok(Json(view))
}

/// GET /api/bookings
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AllocationView>>> {
    let bookings = state
        .allocations
        .list(AllocationKind::VenueEvent, None, None)
        .await?;
    Ok(Json(bookings))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<AllocationView>> {
    let view = ensure_booking(state.allocations.get(id).await?)?;
    Ok(Json(view))
}

/// GET /api/bookings/venue/{venue_id}
pub async fn list_by_venue(
    State(state): State<ServerState>,
    Path(venue_id): Path<i64>,
) -> AppResult<Json<Vec<AllocationView>>> {
    let bookings = state
        .allocations
        .list(AllocationKind::VenueEvent, None, Some(venue_id))
        .await?;
    Ok(Json(bookings))
}

/// PATCH /api/bookings/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AllocationStatusUpdate>,
) -> AppResult<Json<AllocationView>> {
    ensure_booking(state.allocations.get(id).await?)?;
    let view = state.allocations.change_status(id, payload.status).await?;
    Ok(Json(view))
}

/// DELETE /api/bookings/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    ensure_booking(state.allocations.get(id).await?)?;
    state.allocations.delete(id).await?;
    Ok(Json(true))
}
