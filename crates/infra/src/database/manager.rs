//! Database connection manager backed by the shared SQLite pool.

use std::path::Path;
use std::sync::Arc;

use profilebox_common::storage::{
    ConnectionPool, EncryptionKey, SqliteConnection, SqlitePool, SqlitePoolConfig,
};
use profilebox_domain::{DatabaseConfig, ProfileBoxError, Result};
use rusqlite::params;
use tracing::info;

use super::migrations;
use crate::errors::{map_sql_error, map_storage_error};

/// Database manager that wraps a [`SqlitePool`].
pub struct DbManager {
    pool: Arc<SqlitePool>,
}

impl DbManager {
    /// Create a new manager with the given pool size and optional SQLCipher
    /// key. Without a key the file is a plain SQLite database.
    pub fn new<P: AsRef<Path>>(
        db_path: P,
        pool_size: u32,
        encryption_key: Option<&str>,
    ) -> Result<Self> {
        let key = encryption_key
            .map(EncryptionKey::new)
            .transpose()
            .map_err(|e| ProfileBoxError::Config(e.to_string()))?;

        let config = SqlitePoolConfig::default().with_max_size(pool_size.max(1));
        let pool = SqlitePool::new(db_path.as_ref(), key, config).map_err(map_storage_error)?;

        info!(
            db_path = %pool.path().display(),
            encrypted = pool.is_encrypted(),
            "sqlite pool initialised"
        );

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Build a manager from the `[database]` config section.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size, config.encryption_key.as_deref())
    }

    /// Borrow the underlying pool.
    pub fn pool(&self) -> &Arc<SqlitePool> {
        &self.pool
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(map_storage_error)
    }

    /// Apply every pending schema migration and return the versions applied
    /// by this call (empty when the schema was already current).
    pub fn run_migrations(&self) -> Result<Vec<i64>> {
        let mut conn = self.get_connection()?;
        migrations::run_migrations(&mut conn)
    }

    /// Highest applied schema version, `None` for an unversioned database.
    pub fn schema_version(&self) -> Result<Option<i64>> {
        let conn = self.get_connection()?;
        migrations::current_version(&conn)
    }

    /// Return the configured database path.
    pub fn path(&self) -> &Path {
        self.pool.path()
    }

    /// Perform a health check to verify database connectivity.
    pub fn health_check(&self) -> Result<()> {
        let status = self.pool.health_check();
        if !status.healthy {
            return Err(ProfileBoxError::Database(
                status.message.unwrap_or_else(|| "database unhealthy".into()),
            ));
        }

        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    const TEST_KEY: &str = "profilebox-manager-test-key";

    #[test]
    fn migrations_record_schema_version() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("AppData.db");

        let manager = DbManager::new(&db_path, 4, Some(TEST_KEY)).expect("manager created");
        assert_eq!(manager.schema_version().unwrap(), None);

        let applied = manager.run_migrations().expect("migrations run");
        assert_eq!(applied, vec![1, 2]);
        assert_eq!(manager.schema_version().unwrap(), Some(2));
    }

    #[test]
    fn health_check_succeeds_for_valid_database() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("AppData.db");

        let manager = DbManager::new(&db_path, 2, None).expect("manager created");
        manager.run_migrations().expect("migrations run");
        manager.health_check().expect("health check passed");
        assert_eq!(manager.path(), db_path.as_path());
    }

    #[test]
    fn blank_key_is_a_config_error() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("AppData.db");

        let result = DbManager::new(&db_path, 4, Some("   "));
        assert!(matches!(result, Err(ProfileBoxError::Config(_))));
    }

    #[test]
    fn wrong_key_is_rejected() {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("AppData.db");

        {
            let manager = DbManager::new(&db_path, 1, Some(TEST_KEY)).expect("manager created");
            manager.run_migrations().expect("migrations run");
        }

        let result = DbManager::new(&db_path, 1, Some("a-different-key"));
        assert!(matches!(result, Err(ProfileBoxError::Database(_))));
    }
}
