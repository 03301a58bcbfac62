//! SQLite backend
//!
//! Provides an r2d2-based connection pool over rusqlite. When an encryption
//! key is supplied every connection is keyed for SQLCipher before use.

pub mod cipher;
pub mod connection;
pub mod pool;
pub mod pragmas;

pub use cipher::{apply_key, verify_readable, EncryptionKey};
pub use connection::SqliteConnection;
pub use pool::SqlitePool;
pub use pragmas::apply_connection_pragmas;
