//! Dashboard statistics

use serde::{Deserialize, Serialize};

/// Front-of-house overview counters
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FohStatistics {
    pub total_menu_items: i64,
    pub available_menu_items: i64,
    pub total_tables: i64,
    pub available_tables: i64,
    pub occupied_tables: i64,
    pub total_orders: i64,
    pub pending_orders: i64,
    /// Orders in any non-terminal state
    pub active_orders: i64,
    pub total_bookings: i64,
    pub confirmed_bookings: i64,
    /// Sum of totals over non-cancelled orders and bookings
    pub total_revenue: f64,
}
