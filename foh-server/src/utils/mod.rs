//! Utility module — shared helpers and types
//!
//! - [`AppError`] / [`AppResult`] - unified API error handling
//! - [`logger`] - tracing setup
//! - [`time`] - date parsing helpers
//! - [`validation`] - request text validation

pub mod error;
pub mod logger;
pub mod result;
pub mod time;
pub mod validation;

pub use error::{AppError, AppResponse, ok, ok_with_message};
pub use result::AppResult;
