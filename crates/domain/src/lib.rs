//! # ProfileBox Domain
//!
//! Business domain types for ProfileBox.
//!
//! This crate contains:
//! - Profile and section types, and the default content seeded per box
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Pure helpers (update timestamps, placeholder initials)
//!
//! ## Architecture
//! - No dependencies on other ProfileBox crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod defaults;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use defaults::{default_profile, default_sections};
pub use errors::*;
pub use types::*;
pub use utils::initials::initials;
pub use utils::timestamps::{format_timestamp, next_updated_at, parse_timestamp};
