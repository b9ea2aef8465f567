//! Allocation Engine
//!
//! The transactional core shared by the restaurant-order and venue-booking
//! subsystems. It owns three invariants:
//!
//! 1. a finite resource (a table, a venue on a date) is never
//!    double-allocated;
//! 2. an allocation's status only moves along the declared lifecycle;
//! 3. `total_amount` always equals the sum of live line-item subtotals.
//!
//! Every mutation is one transaction on the write pool: it fully applies
//! or fully rolls back. The pool's single connection serializes the
//! check-then-write sequences (see [`crate::db::DbService`]); the partial
//! unique index on `(resource_id, window_date)` backstops the venue race
//! at the schema level.

mod checker;
mod error;
mod ledger;
pub mod money;
mod service;

#[cfg(test)]
mod tests;

pub use error::AllocationError;
pub use service::{AllocationService, AllocationTarget, CreateAllocation, NewItem};
