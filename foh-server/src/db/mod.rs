//! Database Module
//!
//! SQLite connection pools and migrations. Reads go through a small
//! multi-connection pool; all writes go through a single-connection pool,
//! so every read-modify-write transaction is serialized at the pool level.
//! WAL mode keeps readers unblocked while a write transaction is open.

pub mod repository;

use crate::utils::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

/// Database service — owns the read and write pools
#[derive(Clone)]
pub struct DbService {
    read: SqlitePool,
    write: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) a file-backed database and run migrations
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("foreign_keys", "ON");

        let write = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options.clone())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let read = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        sqlx::migrate!("./migrations")
            .run(&write)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;

        tracing::info!("Database ready (SQLite WAL, single-connection write pool)");
        Ok(Self { read, write })
    }

    /// In-memory database for tests; one shared connection serves both
    /// pools so reads observe writes immediately
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::database(e.to_string()))?
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;

        Ok(Self {
            read: pool.clone(),
            write: pool,
        })
    }

    /// Pool for read-only queries
    pub fn read(&self) -> &SqlitePool {
        &self.read
    }

    /// Pool for mutations; its single connection is the serialization
    /// point for every check-then-write sequence
    pub fn write(&self) -> &SqlitePool {
        &self.write
    }
}
