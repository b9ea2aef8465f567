//! Repository Module
//!
//! Function-style CRUD over the SQLite pools. Mutating functions expect
//! the write pool; read functions take whichever pool the caller hands
//! them. Allocation mutations do not live here — they belong to the
//! allocation engine, which runs them inside its own transactions.

pub mod dining_table;
pub mod employee;
pub mod guest;
pub mod inventory_item;
pub mod menu_item;
pub mod statistics;
pub mod venue;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
