//! Process configuration, read from environment variables.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("Unknown STORAGE_BACKEND {0:?} (expected \"postgres\" or \"memory\")")]
    UnknownBackend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    /// Non-persistent; `seeded` preloads the sample recipes
    Memory { seeded: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: StorageBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup so parsing can be tested without
    /// touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_addr.clone(),
                source,
            })?;

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.trim().to_ascii_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            },
            "memory" => StorageBackend::Memory {
                seeded: lookup("SEED_MEMORY_STORE").map_or(true, |v| v.trim() != "0"),
            },
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self { bind_addr, storage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_postgres_by_default() {
        let cfg = config(&[("DATABASE_URL", "postgres://localhost/recipes")]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(
            cfg.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/recipes".to_string()
            }
        );
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let err = config(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn test_memory_backend() {
        let cfg = config(&[("STORAGE_BACKEND", "memory"), ("BIND_ADDR", "127.0.0.1:8080")]).unwrap();
        assert_eq!(cfg.storage, StorageBackend::Memory { seeded: true });
        assert_eq!(cfg.bind_addr.port(), 8080);

        let cfg = config(&[("STORAGE_BACKEND", "Memory"), ("SEED_MEMORY_STORE", "0")]).unwrap();
        assert_eq!(cfg.storage, StorageBackend::Memory { seeded: false });
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            config(&[("STORAGE_BACKEND", "sqlite")]),
            Err(ConfigError::UnknownBackend(_))
        ));
        assert!(matches!(
            config(&[("STORAGE_BACKEND", "memory"), ("BIND_ADDR", "nope")]),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
    }
}
