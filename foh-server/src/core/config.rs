//! Server configuration

/// Server configuration — all items can be overridden via environment
/// variables:
///
/// | env variable | default | description |
/// |---------------|---------------------|---------------------------|
/// | WORK_DIR | /var/lib/foh | working directory |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | `<WORK_DIR>/foh.db` | SQLite database file |
/// | LOG_LEVEL | info | tracing level |
/// | LOG_DIR | (stdout only) | daily-rolling log files |
/// | ENVIRONMENT | development | development \| production |
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and log files
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file path
    pub database_path: String,
    pub log_level: String,
    /// When set, logs also go to daily-rolling files in this directory
    pub log_dir: Option<String>,
    /// development | production
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/foh".into());
        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| format!("{work_dir}/foh.db"));
        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }
}

/// Load .env, ensure the work directory exists, and initialize logging
pub fn setup_environment() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    std::fs::create_dir_all(&config.work_dir)?;
    crate::utils::logger::init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());
    Ok(())
}
