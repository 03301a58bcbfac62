//! # ProfileBox Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for profile, section and photo storage
//! - The seeder that gives every user their four default boxes
//! - Profile and session services used by the command layer
//!
//! ## Architecture Principles
//! - Only depends on `profilebox-domain`
//! - No database or filesystem writes of its own
//! - All external dependencies via traits

pub mod profile;
pub mod session;

pub use profile::ports::{PhotoStore, ProfileRepository, SectionRepository};
pub use profile::seeder::{ProfileSeeder, SeedReport};
pub use profile::service::{resolve_photo, ProfileService};
pub use session::{Session, SessionService};
