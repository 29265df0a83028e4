//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                        | Default            |
//! |---------------------------------|--------------------|
//! | `SALESTRACK_DB_PATH`            | `./salestrack.db`  |
//! | `SALESTRACK_UTC_OFFSET_MINUTES` | `60` (WAT)         |
//! | `SALESTRACK_MAX_CONNECTIONS`    | `5`                |

use chrono::FixedOffset;
use salestrack_db::DbConfig;
use std::env;
use std::path::PathBuf;

const DB_PATH: &str = "SALESTRACK_DB_PATH";
const UTC_OFFSET_MINUTES: &str = "SALESTRACK_UTC_OFFSET_MINUTES";
const MAX_CONNECTIONS: &str = "SALESTRACK_MAX_CONNECTIONS";

/// CLI configuration.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Offset that defines the store's calendar days
    pub utc_offset: FixedOffset,

    /// Pool size for database connections
    pub max_connections: u32,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let offset_minutes: i32 = lookup(UTC_OFFSET_MINUTES)
            .unwrap_or_else(|| "60".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(UTC_OFFSET_MINUTES.to_string()))?;

        // Real-world offsets run from UTC-12:00 to UTC+14:00
        if !(-720..=840).contains(&offset_minutes) {
            return Err(ConfigError::InvalidValue(UTC_OFFSET_MINUTES.to_string()));
        }
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .ok_or_else(|| ConfigError::InvalidValue(UTC_OFFSET_MINUTES.to_string()))?;

        let max_connections: u32 = lookup(MAX_CONNECTIONS)
            .unwrap_or_else(|| "5".to_string())
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(MAX_CONNECTIONS.to_string()))?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(MAX_CONNECTIONS.to_string()));
        }

        let db_path = lookup(DB_PATH)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| "./salestrack.db".to_string());

        Ok(CliConfig {
            db_path: PathBuf::from(db_path),
            utc_offset,
            max_connections,
        })
    }

    /// Pool settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
