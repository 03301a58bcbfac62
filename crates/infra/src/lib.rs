//! # ProfileBox Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite/SQLCipher and PostgreSQL repositories
//! - Versioned schema migrations, including the legacy single-profile upgrade
//! - Configuration loading from the environment and config files
//! - Filesystem photo storage
//!
//! ## Architecture
//! - Implements traits defined in `profilebox-core`
//! - Depends on `profilebox-common` for the connection pool
//! - Contains all "impure" code (database, filesystem, environment)

pub mod config;
pub mod database;
pub mod errors;
pub mod photos;

// Re-export commonly used items
pub use config::loader::{load, load_from_env, load_from_file};
pub use database::postgres::{PgManager, PostgresProfileRepository};
pub use database::{DbManager, SqliteProfileRepository};
pub use errors::InfraError;
pub use photos::FsPhotoStore;
