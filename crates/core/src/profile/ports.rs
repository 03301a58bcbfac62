//! Port interfaces for profile storage
//!
//! Repositories report absence as `Ok(None)`; turning that into the empty
//! values the UI shows is the service's job. Section names are free text at
//! this boundary.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profilebox_domain::{Profile, Result, SectionEntry};

/// Persistence for the per-box profile row
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Read the profile stored for (username, profile key)
    async fn get_profile(&self, username: &str, profile_key: &str) -> Result<Option<Profile>>;

    /// Insert or overwrite all three profile fields
    async fn save_profile(&self, username: &str, profile_key: &str, profile: &Profile)
        -> Result<()>;

    /// Insert the profile only when no row exists. Returns whether a row was
    /// written.
    async fn insert_profile_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> Result<bool>;
}

/// Persistence for section bodies
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Read one section
    async fn get_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
    ) -> Result<Option<SectionEntry>>;

    /// Insert or overwrite a section body and refresh its update time.
    ///
    /// Returns the stored update time, which is strictly later than the
    /// previous one for the same row.
    async fn save_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<DateTime<Utc>>;

    /// Insert the section only when no row exists. Returns whether a row was
    /// written.
    async fn insert_section_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<bool>;
}

/// Storage for profile photos picked by the user
#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Copy `source` into the photo store for (username, profile key),
    /// replacing any earlier photo, and return the stored path.
    async fn import(&self, source: &Path, username: &str, profile_key: &str) -> Result<PathBuf>;
}
