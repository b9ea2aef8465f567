//! Data models
//!
//! Shared between the server and its API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), all timestamps are
//! Unix milliseconds, calendar dates travel as `YYYY-MM-DD` strings.

pub mod allocation;
pub mod dining_table;
pub mod employee;
pub mod guest;
pub mod inventory_item;
pub mod menu_item;
pub mod statistics;
pub mod venue;

// Re-exports
pub use allocation::*;
pub use dining_table::*;
pub use employee::*;
pub use guest::*;
pub use inventory_item::*;
pub use menu_item::*;
pub use statistics::*;
pub use venue::*;
