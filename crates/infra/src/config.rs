//! Configuration loading and representation.
//!
//! Everything comes from environment variables with development defaults:
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` | listen address |
//! | `DATABASE_URL` | `sqlite://inventory.db` | `sqlite:` or `postgres://` URL, or `memory` |
//! | `LOG_FORMAT` | `json` | `json` or `pretty` |

use std::net::SocketAddr;

use thiserror::Error;

use stockroom_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://inventory.db";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Which storage collaborator backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    InMemory,
    Sqlite { url: String },
    Postgres { url: String },
}

impl DatabaseConfig {
    fn from_url(url: &str) -> Result<Self, ConfigError> {
        let url = url.trim();
        if url.is_empty() {
            return Self::from_url(DEFAULT_DATABASE_URL);
        }
        if url.eq_ignore_ascii_case("memory") {
            return Ok(Self::InMemory);
        }
        if url.starts_with("sqlite:") {
            return Ok(Self::Sqlite { url: url.to_string() });
        }
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            return Ok(Self::Postgres { url: url.to_string() });
        }
        Err(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: url.to_string(),
            reason: "expected a sqlite: or postgres:// URL, or memory".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database: DatabaseConfig,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.trim().parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                key: "BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let database = DatabaseConfig::from_url(
            &lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
        )?;

        let log_format = match lookup("LOG_FORMAT") {
            Some(raw) => raw.parse().map_err(|e: stockroom_observability::ParseLogFormatError| {
                ConfigError::Invalid {
                    key: "LOG_FORMAT",
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            bind_addr,
            database,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_to_sqlite_file_json_on_8080() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(
            cfg.database,
            DatabaseConfig::Sqlite {
                url: "sqlite://inventory.db".to_string()
            }
        );
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn selects_store_from_database_url() {
        let cfg = load(&[("DATABASE_URL", "sqlite://inventory.db")]).unwrap();
        assert_eq!(
            cfg.database,
            DatabaseConfig::Sqlite {
                url: "sqlite://inventory.db".to_string()
            }
        );

        let cfg = load(&[("DATABASE_URL", "postgresql://u:p@db/stock")]).unwrap();
        assert!(matches!(cfg.database, DatabaseConfig::Postgres { .. }));

        let cfg = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(matches!(cfg.database, DatabaseConfig::Sqlite { .. }));

        let cfg = load(&[("DATABASE_URL", "memory")]).unwrap();
        assert_eq!(cfg.database, DatabaseConfig::InMemory);
    }

    #[test]
    fn invalid_values_name_the_offending_key() {
        let err = load(&[("BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));

        let err = load(&[("DATABASE_URL", "mysql://x")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "DATABASE_URL", .. }));

        let err = load(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "LOG_FORMAT", .. }));
    }
}
