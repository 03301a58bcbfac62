//! Connection pool configuration

use std::time::Duration;

use super::error::{StorageError, StorageResult};

/// Upper bound on pool size accepted by [`SqlitePoolConfig::validate`].
pub const MAX_POOL_SIZE: u32 = 64;

/// r2d2 pool settings and per-connection pragmas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlitePoolConfig {
    /// Maximum number of connections in the pool
    pub max_size: u32,

    /// How long to wait for a free connection
    pub connection_timeout: Duration,

    /// Busy timeout for SQLite lock contention
    pub busy_timeout: Duration,

    /// Enable WAL journal mode
    pub enable_wal: bool,

    /// Enable foreign key enforcement
    pub enable_foreign_keys: bool,
}

impl Default for SqlitePoolConfig {
    fn default() -> Self {
        Self {
            max_size: 4,
            connection_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_millis(5000),
            enable_wal: true,
            enable_foreign_keys: true,
        }
    }
}

impl SqlitePoolConfig {
    /// Set the pool size
    #[must_use]
    pub const fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Set the connection acquisition timeout
    #[must_use]
    pub const fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Disable WAL mode (rollback journal instead)
    #[must_use]
    pub const fn without_wal(mut self) -> Self {
        self.enable_wal = false;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the pool size or a timeout is out of range.
    pub fn validate(&self) -> StorageResult<()> {
        if self.max_size == 0 {
            return Err(StorageError::InvalidConfig(
                "pool size must be greater than 0".to_string(),
            ));
        }
        if self.max_size > MAX_POOL_SIZE {
            return Err(StorageError::InvalidConfig(format!(
                "pool size too large (max: {MAX_POOL_SIZE})"
            )));
        }
        if self.connection_timeout.is_zero() {
            return Err(StorageError::InvalidConfig(
                "connection timeout must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for storage::config.
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SqlitePoolConfig::default();

        assert_eq!(config.max_size, 4);
        assert_eq!(config.connection_timeout, Duration::from_secs(5));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.enable_wal, "WAL mode should be enabled by default");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = SqlitePoolConfig::default()
            .with_max_size(8)
            .with_connection_timeout(Duration::from_secs(1))
            .without_wal();

        assert_eq!(config.max_size, 8);
        assert_eq!(config.connection_timeout, Duration::from_secs(1));
        assert!(!config.enable_wal);
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        assert!(SqlitePoolConfig::default().with_max_size(0).validate().is_err());
        assert!(SqlitePoolConfig::default().with_max_size(MAX_POOL_SIZE + 1).validate().is_err());
        assert!(SqlitePoolConfig::default()
            .with_connection_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
