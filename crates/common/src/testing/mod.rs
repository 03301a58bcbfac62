//! Testing utilities
//!
//! - **[`temp`]**: self-cleaning directories for throwaway databases and
//!   photo files

pub mod temp;

pub use temp::TempDir;
