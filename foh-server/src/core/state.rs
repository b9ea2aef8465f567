//! Server state

use crate::allocations::AllocationService;
use crate::core::Config;
use crate::db::DbService;

/// Server state — shared handles for all services
///
/// Cloning is cheap: the pools inside [`DbService`] are reference-counted.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    /// The allocation engine (orders / bookings / line items)
    pub allocations: AllocationService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        let allocations = AllocationService::new(db.clone());
        Self {
            config,
            db,
            allocations,
        }
    }

    /// Open the database and build the full state
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        let db = DbService::open(&config.database_path)
            .await
            .map_err(|e| anyhow::anyhow!("database initialization failed: {e}"))?;
        Ok(Self::new(config.clone(), db))
    }
}
