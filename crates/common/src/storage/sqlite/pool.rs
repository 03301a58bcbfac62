//! r2d2 connection pool over rusqlite
//!
//! Every connection the pool opens is keyed (when a key is configured) and
//! then has the connection pragmas applied. The first connection is checked
//! eagerly so a wrong key fails pool creation instead of the first query.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info, instrument, warn};

use super::cipher::{apply_key, verify_readable, EncryptionKey};
use super::connection::SqliteConnection;
use super::pragmas::apply_connection_pragmas;
use crate::storage::config::SqlitePoolConfig;
use crate::storage::error::{is_wrong_key_message, StorageError, StorageResult};
use crate::storage::metrics::StorageMetrics;
use crate::storage::types::{ConnectionPool, HealthStatus, PoolMetrics};

/// Pool of SQLite connections, optionally SQLCipher-encrypted
#[derive(Debug)]
pub struct SqlitePool {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
    config: SqlitePoolConfig,
    encrypted: bool,
    metrics: Arc<StorageMetrics>,
}

impl SqlitePool {
    /// Open (creating if needed) the database at `path` and build the pool.
    ///
    /// # Errors
    /// Returns an error if:
    /// - the configuration is invalid
    /// - the parent directory cannot be created
    /// - the file cannot be opened or read with the given key
    #[instrument(skip(key, config), fields(db_path = %path.display(), pool_size = config.max_size, encrypted = key.is_some()))]
    pub fn new(
        path: &Path,
        key: Option<EncryptionKey>,
        config: SqlitePoolConfig,
    ) -> StorageResult<Self> {
        config.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let encrypted = key.is_some();
        let pragma_config = config.clone();
        let manager = SqliteConnectionManager::file(path).with_init(move |conn| {
            if let Some(key) = key.as_ref() {
                apply_key(conn, key)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            }
            apply_connection_pragmas(conn, &pragma_config)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
            Ok(())
        });

        let pool = Pool::builder()
            .max_size(config.max_size)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .map_err(|e| {
                warn!(error = %e, "Failed to create connection pool");
                classify_open_error(&e)
            })?;

        {
            let conn = pool.get().map_err(|e| {
                warn!(error = %e, "Failed to get test connection");
                classify_open_error(&e)
            })?;
            verify_readable(&conn)?;
        }

        info!("SQLite pool ready with {} connections", config.max_size);

        Ok(Self {
            pool,
            path: path.to_path_buf(),
            config,
            encrypted,
            metrics: Arc::new(StorageMetrics::new()),
        })
    }

    /// Borrow a connection from the pool
    ///
    /// # Errors
    /// Returns `Timeout` when the pool stays exhausted past the configured
    /// timeout, `Connection` for any other acquisition failure.
    pub fn get(&self) -> StorageResult<SqliteConnection> {
        let start = Instant::now();

        match self.pool.get() {
            Ok(conn) => {
                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                self.metrics.record_connection_acquired(duration_ms);
                debug!(duration_ms, "Connection acquired");
                Ok(SqliteConnection::new(conn))
            }
            Err(e) => {
                if e.to_string().to_lowercase().contains("timed out") {
                    self.metrics.record_connection_timeout();
                    warn!("Connection timeout after {:?}", self.config.connection_timeout);
                    Err(StorageError::Timeout(self.config.connection_timeout.as_secs()))
                } else {
                    self.metrics.record_connection_error();
                    warn!(error = %e, "Connection error");
                    Err(StorageError::Connection(format!("Failed to get connection: {e}")))
                }
            }
        }
    }

    /// Database file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether connections are keyed with SQLCipher
    pub const fn is_encrypted(&self) -> bool {
        self.encrypted
    }
}

impl ConnectionPool for SqlitePool {
    fn health_check(&self) -> HealthStatus {
        let state = self.pool.state();

        match self.pool.get() {
            Ok(conn) => match verify_readable(&conn) {
                Ok(()) => HealthStatus::healthy(
                    state.connections as usize,
                    state.idle_connections as usize,
                    self.config.max_size as usize,
                ),
                Err(e) => HealthStatus::unhealthy(format!("Database unreadable: {e}")),
            },
            Err(e) => HealthStatus::unhealthy(format!("Pool unhealthy: {e}")),
        }
    }

    fn metrics(&self) -> PoolMetrics {
        PoolMetrics {
            connections_acquired: self.metrics.connections_acquired(),
            connections_timeout: self.metrics.connections_timeout(),
            connections_error: self.metrics.connections_error(),
            avg_acquisition_time_ms: self.metrics.avg_connection_time_ms(),
        }
    }
}

fn classify_open_error(err: &r2d2::Error) -> StorageError {
    if is_wrong_key_message(&err.to_string()) {
        StorageError::WrongKeyOrNotEncrypted
    } else {
        StorageError::Connection(format!("Failed to open database: {err}"))
    }
}
