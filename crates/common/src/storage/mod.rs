//! Storage primitives for the embedded database
//!
//! Provides an r2d2 pool of rusqlite connections with per-connection pragmas
//! and optional SQLCipher keying. Schema management is left to the
//! application layer.

pub mod config;
pub mod error;
pub mod metrics;
pub mod sqlite;
pub mod types;

// Re-export commonly used types
pub use config::SqlitePoolConfig;
pub use error::{StorageError, StorageResult};
pub use metrics::StorageMetrics;
pub use sqlite::{apply_connection_pragmas, EncryptionKey, SqliteConnection, SqlitePool};
pub use types::{ConnectionPool, HealthStatus, PoolMetrics};
