//! Dining Table API Module

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/status", patch(handler::update_status))
        .route("/number/{number}", get(handler::get_by_number))
        .route("/status/{status}", get(handler::list_by_status))
        .route("/capacity/{capacity}", get(handler::list_by_min_capacity))
        .route("/location/{location}", get(handler::list_by_location))
}
