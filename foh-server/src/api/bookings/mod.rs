//! Venue Booking API Module
//!
//! Bookings are the window-scoped face of the allocation engine: one
//! confirmed booking per (venue, date).

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bookings", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/status", patch(handler::update_status))
        .route("/venue/{venue_id}", get(handler::list_by_venue))
}
