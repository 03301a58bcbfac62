//! # ProfileBox App
//!
//! Application layer - commands, context and the command-line entry point.
//!
//! This crate contains:
//! - Commands (CLI → services bridge)
//! - Application context (dependency injection)
//! - Logging setup and health reporting
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod cli;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
