//! Application configuration
//!
//! Every section has defaults, so a partial config file only needs to name
//! the values it changes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DB_FILE, DEFAULT_PHOTO_DIR};
use crate::errors::{ProfileBoxError, Result};
use crate::impl_name_conversions;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub photos: PhotoConfig,
}

impl Config {
    /// Check cross-field constraints
    ///
    /// # Errors
    /// Returns `ProfileBoxError::Config` describing the first violation.
    pub fn validate(&self) -> Result<()> {
        let db = &self.database;
        if db.pool_size == 0 {
            return Err(ProfileBoxError::Config("database.pool_size must be at least 1".into()));
        }
        match db.backend {
            DatabaseBackend::Sqlite if db.path.as_os_str().is_empty() => {
                Err(ProfileBoxError::Config("database.path cannot be empty".into()))
            }
            DatabaseBackend::Postgres if db.url.as_deref().map_or(true, str::is_empty) => Err(
                ProfileBoxError::Config("database.url is required for the postgres backend".into()),
            ),
            _ => Ok(()),
        }
    }
}

/// Storage engine selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    /// Embedded file database, optionally SQLCipher-encrypted
    #[default]
    Sqlite,
    /// Local PostgreSQL server
    Postgres,
}

impl_name_conversions!(DatabaseBackend {
    Sqlite => "sqlite",
    Postgres => "postgres",
});

/// Database settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub backend: DatabaseBackend,
    /// SQLite database file
    pub path: PathBuf,
    pub pool_size: u32,
    /// SQLCipher key; `None` opens a plain SQLite file
    pub encryption_key: Option<String>,
    /// PostgreSQL connection string (`host=... user=... dbname=...` or URL)
    pub url: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Sqlite,
            path: PathBuf::from(DEFAULT_DB_FILE),
            pool_size: 4,
            encryption_key: None,
            url: None,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

/// Profile photo storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoConfig {
    /// Directory imported photos are copied into
    pub directory: PathBuf,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from(DEFAULT_PHOTO_DIR) }
    }
}
