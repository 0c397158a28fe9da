//! Configuration management for tasklight.
//!
//! Configuration can be set via environment variables:
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `DATA_DIR` - Optional. Directory for the SQLite database. Defaults to `./data`.
//! - `TODO_STORE` - Optional. Storage backend: `sqlite` (default) or `memory`.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::TodoStoreType;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Directory holding the SQLite database file
    pub data_dir: PathBuf,

    /// Which storage backend to use
    pub store_type: TodoStoreType,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let data_dir = std::env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let store_type = std::env::var("TODO_STORE")
            .map(|s| TodoStoreType::from_str(&s))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            data_dir,
            store_type,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(host: String, port: u16, data_dir: PathBuf, store_type: TodoStoreType) -> Self {
        Self {
            host,
            port,
            data_dir,
            store_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_type_parses_known_values() {
        assert_eq!(TodoStoreType::from_str("memory"), TodoStoreType::Memory);
        assert_eq!(TodoStoreType::from_str("sqlite"), TodoStoreType::Sqlite);
        assert_eq!(TodoStoreType::from_str("db"), TodoStoreType::Sqlite);
        assert_eq!(TodoStoreType::from_str("SQLITE"), TodoStoreType::Sqlite);
    }

    #[test]
    fn store_type_defaults_to_sqlite() {
        assert_eq!(TodoStoreType::from_str("bogus"), TodoStoreType::Sqlite);
        assert_eq!(TodoStoreType::default(), TodoStoreType::Sqlite);
    }
}
