//! Inventory API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/inventory", routes())
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
        .route("/{id}/use", post(handler::use_stock))
        .route("/{id}/restock", post(handler::restock))
        .route("/low-stock", get(handler::list_low_stock))
        .route("/search/{keyword}", get(handler::search))
}
