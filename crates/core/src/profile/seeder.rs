//! Default content seeding
//!
//! Gives a user the four profile boxes and their sections. Only missing rows
//! are written, so reseeding never reverts an edit.

use std::sync::Arc;

use profilebox_domain::constants::PROFILE_KEYS;
use profilebox_domain::{default_profile, default_sections, Profile, ProfileBoxError, Result};
use tracing::{debug, info, instrument};

use super::ports::{ProfileRepository, SectionRepository};

/// Rows written by one seeding pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub profiles_inserted: usize,
    pub sections_inserted: usize,
}

impl SeedReport {
    /// True when the user already had every default row
    pub const fn is_noop(&self) -> bool {
        self.profiles_inserted == 0 && self.sections_inserted == 0
    }
}

/// Inserts the default boxes for a user
#[derive(Clone)]
pub struct ProfileSeeder {
    profiles: Arc<dyn ProfileRepository>,
    sections: Arc<dyn SectionRepository>,
}

impl ProfileSeeder {
    /// Create a seeder over the given repositories
    pub fn new(profiles: Arc<dyn ProfileRepository>, sections: Arc<dyn SectionRepository>) -> Self {
        Self { profiles, sections }
    }

    /// Insert any missing default profile and section rows for `username`.
    ///
    /// # Errors
    /// Returns `InvalidInput` for a blank username and propagates storage
    /// failures. Rows inserted before a failure stay in place; rerunning
    /// completes the seed.
    #[instrument(skip(self))]
    pub async fn seed_user(&self, username: &str) -> Result<SeedReport> {
        if username.trim().is_empty() {
            return Err(ProfileBoxError::InvalidInput("username is required".into()));
        }

        let mut report = SeedReport::default();
        for profile_key in PROFILE_KEYS {
            let seed = Profile::from(default_profile(profile_key));
            if self.profiles.insert_profile_if_absent(username, profile_key, &seed).await? {
                report.profiles_inserted += 1;
            }

            for (section, body) in default_sections(profile_key) {
                let inserted = self
                    .sections
                    .insert_section_if_absent(username, profile_key, section.as_str(), body)
                    .await?;
                if inserted {
                    report.sections_inserted += 1;
                }
            }
        }

        if report.is_noop() {
            debug!("defaults already present");
        } else {
            info!(
                profiles_inserted = report.profiles_inserted,
                sections_inserted = report.sections_inserted,
                "seeded default profile boxes"
            );
        }
        Ok(report)
    }
}
