//! API Routes
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`tables`] - dining table registry
//! - [`venues`] - venue registry
//! - [`menu_items`] - menu catalog
//! - [`orders`] - restaurant orders and their line items
//! - [`bookings`] - venue event bookings
//! - [`guests`] - guest registry
//! - [`employees`] - staff roster
//! - [`inventory`] - stock counts
//! - [`statistics`] - dashboard counters

pub mod bookings;
pub mod employees;
pub mod guests;
pub mod health;
pub mod inventory;
pub mod menu_items;
pub mod orders;
pub mod statistics;
pub mod tables;
pub mod venues;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::ServerState;

/// Assemble the full application router
pub fn router(state: ServerState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(tables::router())
        .merge(venues::router())
        .merge(menu_items::router())
        .merge(orders::router())
        .merge(bookings::router())
        .merge(guests::router())
        .merge(employees::router())
        .merge(inventory::router())
        .merge(statistics::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
