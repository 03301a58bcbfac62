//! Per-connection pragma setup

use rusqlite::Connection;

use crate::storage::config::SqlitePoolConfig;
use crate::storage::error::{StorageError, StorageResult};

/// Apply connection-level pragmas
///
/// Runs on every connection the pool opens: journal mode, synchronous level,
/// foreign key enforcement and busy timeout.
///
/// # Errors
/// Returns `Query` if a pragma is rejected.
pub fn apply_connection_pragmas(conn: &Connection, config: &SqlitePoolConfig) -> StorageResult<()> {
    let mut pragma_sql = String::new();

    if config.enable_wal {
        pragma_sql.push_str("PRAGMA journal_mode=WAL;\n");
    }
    pragma_sql.push_str("PRAGMA synchronous=NORMAL;\n");
    if config.enable_foreign_keys {
        pragma_sql.push_str("PRAGMA foreign_keys=ON;\n");
    }

    conn.execute_batch(&pragma_sql)
        .map_err(|e| StorageError::Query(format!("Failed to apply pragmas: {e}")))?;

    conn.busy_timeout(config.busy_timeout)
        .map_err(|e| StorageError::Query(format!("Failed to set busy timeout: {e}")))?;

    Ok(())
}
