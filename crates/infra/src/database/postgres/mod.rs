//! PostgreSQL backend
//!
//! Tables use snake_case names (`profiles`, `sections`) and `updated_at` is
//! a `TIMESTAMPTZ`. A single client connection is shared behind an async
//! mutex; transactions need exclusive access to it.

pub mod manager;
pub mod migrations;
pub mod repository;

pub use manager::PgManager;
pub use repository::PostgresProfileRepository;
