//! Core Module — configuration, state, and the HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, setup_environment};
pub use server::Server;
pub use state::ServerState;
