//! Infrastructure layer: storage collaborators and configuration.

pub mod config;
pub mod store;


pub use config::{AppConfig, ConfigError, DatabaseConfig};
