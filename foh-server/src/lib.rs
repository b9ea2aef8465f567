//! Front-of-House Management Server
//!
//! A single service node for hospitality record-keeping: restaurant tables
//! and orders, venue bookings, the menu catalog, and the plain registries
//! (guests, employees, inventory).
//!
//! # Module structure
//!
//! ```text
//! foh-server/src/
//! ├── core/         # configuration, state, HTTP server
//! ├── api/          # HTTP routes and handlers
//! ├── db/           # SQLite pools, migrations, CRUD repositories
//! ├── allocations/  # the allocation engine (orders, bookings, totals)
//! └── utils/        # errors, logging, validation helpers
//! ```
//!
//! The interesting part is `allocations`: the transactional core that
//! prevents double-booking, walks the order/booking lifecycle, and keeps
//! every aggregate's `total_amount` equal to the sum of its line items.

pub mod allocations;
pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use allocations::{AllocationError, AllocationService};
pub use self::core::{Config, Server, ServerState, setup_environment};
pub use db::DbService;
pub use utils::{AppError, AppResult};
