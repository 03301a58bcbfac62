//! Database backends
//!
//! SQLite (optionally SQLCipher-encrypted) is the default store; PostgreSQL
//! is available for setups that keep profiles on a local server. Both share
//! the same migration plan so `schema_version` means the same thing in
//! either.

pub mod manager;
pub mod migrations;
pub mod postgres;
pub mod profile_repository;

pub use manager::DbManager;
pub use migrations::{MigrationStep, MIGRATION_PLAN};
pub use profile_repository::SqliteProfileRepository;
