//! Shared types for the front-of-house services
//!
//! Data models and utility functions used by the server (and by any future
//! client crates). DB row derives are feature-gated behind `db` so the
//! models can be consumed without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
