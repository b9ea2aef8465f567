//! Restaurant Order API Module
//!
//! Orders and their line items are served by the allocation engine; the
//! handlers here only translate the REST surface into engine calls.

mod handler;

use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/orders", routes())
        .nest("/api/order-items", item_routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/items", get(handler::list_items).post(handler::add_item))
        .route("/reference/{reference}", get(handler::get_by_reference))
        .route("/status/{status}", get(handler::list_by_status))
        .route("/table/{table_id}", get(handler::list_by_table))
}

fn item_routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}", delete(handler::remove_item))
        .route("/{id}/quantity", patch(handler::update_item_quantity))
}
