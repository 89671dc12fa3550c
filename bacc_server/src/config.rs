//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use baccarat::{
    TableConfig,
    constants::{DEFAULT_HISTORY_BATCH, DEFAULT_MAX_WORKERS},
    table::ShoeSource,
};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    str::FromStr,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DECKS: usize = 1;

/// Values given on the command line. Each one wins over its environment
/// variable.
#[derive(Debug, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub decks: Option<usize>,
    pub host: Option<IpAddr>,
    pub data_dir: Option<PathBuf>,
    pub workers: Option<usize>,
    pub resume: bool,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Maximum number of sessions served at once
    pub workers: usize,
    /// Deck count from the command line or environment. Ignored when
    /// resuming a shoe.
    pub decks: usize,
    pub table: TableConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but can't be parsed
    pub fn from_env(overrides: Overrides) -> Result<Self, ConfigError> {
        Self::from_lookup(overrides, |key| std::env::var(key).ok())
    }

    /// Load configuration with `lookup` standing in for the environment.
    pub fn from_lookup<F>(overrides: Overrides, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match overrides.host {
            Some(host) => host,
            None => parse_var_or(&lookup, "BACCARAT_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?,
        };
        let port = match overrides.port {
            Some(port) => port,
            None => parse_var_or(&lookup, "BACCARAT_PORT", DEFAULT_PORT)?,
        };
        let decks = match overrides.decks {
            Some(decks) => decks,
            None => parse_var_or(&lookup, "BACCARAT_DECKS", DEFAULT_DECKS)?,
        };
        let workers = match overrides.workers {
            Some(workers) => workers,
            None => parse_var_or(&lookup, "BACCARAT_WORKERS", DEFAULT_MAX_WORKERS)?,
        };
        let data_dir = overrides
            .data_dir
            .or_else(|| lookup("BACCARAT_DATA_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));
        let history_batch = parse_var_or(&lookup, "BACCARAT_HISTORY_BATCH", DEFAULT_HISTORY_BATCH)?;

        let shoe = if overrides.resume {
            ShoeSource::Resume
        } else {
            ShoeSource::Shuffle { num_decks: decks }
        };

        Ok(ServerConfig {
            bind: SocketAddr::new(host, port),
            workers,
            decks,
            table: TableConfig {
                data_dir,
                shoe,
                history_batch,
            },
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.table.shoe, ShoeSource::Shuffle { .. }) && self.decks == 0 {
            return Err(ConfigError::Invalid {
                var: "BACCARAT_DECKS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.workers == 0 {
            return Err(ConfigError::Invalid {
                var: "BACCARAT_WORKERS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.table.history_batch == 0 {
            return Err(ConfigError::Invalid {
                var: "BACCARAT_HISTORY_BATCH".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_var_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var: key.to_string(),
            reason: format!("{value:?}: {e}"),
        }),
    }
}
