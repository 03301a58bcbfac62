//! Shared building blocks for the ProfileBox crates.
//!
//! # Feature Tiers
//!
//! Enable cargo features to opt into the tiers you need:
//! - `foundation`: config-source errors and error classification
//! - `observability`: tracing instrumentation (not included by default)
//! - `platform`: embedded SQLite storage with optional SQLCipher encryption
//! - `test-utils`: throwaway directories for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

// Foundation tier
// -----------------------------------------------------------------
#[cfg(feature = "foundation")]
pub mod error;

// Platform tier
// -------------------------------------------------------------------
#[cfg(feature = "platform")]
pub mod storage;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

#[cfg(feature = "foundation")]
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
