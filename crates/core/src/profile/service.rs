//! Profile page service
//!
//! Wraps the repositories with the read/write semantics the screens rely on:
//! absent rows read as empty strings and missing inputs are stored as empty
//! strings.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use profilebox_domain::constants::PROFILE_KEYS;
use profilebox_domain::{
    initials, PhotoSource, Profile, ProfileBoxError, ProfileFields, ProfilePage, Result,
    SectionName, SectionView,
};
use tracing::{debug, instrument};

use super::ports::{PhotoStore, ProfileRepository, SectionRepository};

/// Reads and writes the contents of a profile box
#[derive(Clone)]
pub struct ProfileService {
    profiles: Arc<dyn ProfileRepository>,
    sections: Arc<dyn SectionRepository>,
    photos: Option<Arc<dyn PhotoStore>>,
}

impl ProfileService {
    /// Create a service without photo import support
    pub fn new(profiles: Arc<dyn ProfileRepository>, sections: Arc<dyn SectionRepository>) -> Self {
        Self { profiles, sections, photos: None }
    }

    /// Enable [`Self::import_photo`]
    #[must_use]
    pub fn with_photo_store(mut self, photos: Arc<dyn PhotoStore>) -> Self {
        self.photos = Some(photos);
        self
    }

    /// Profile fields, or empty strings when no row exists
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn get_profile(&self, username: &str, profile_key: &str) -> Result<Profile> {
        Ok(self.profiles.get_profile(username, profile_key).await?.unwrap_or_default())
    }

    /// Overwrite all three profile fields; missing values become empty
    /// strings.
    ///
    /// # Errors
    /// Propagates storage failures.
    #[instrument(skip(self, fields))]
    pub async fn save_profile(
        &self,
        username: &str,
        profile_key: &str,
        fields: ProfileFields,
    ) -> Result<Profile> {
        let profile = fields.normalized();
        self.profiles.save_profile(username, profile_key, &profile).await?;
        debug!("profile saved");
        Ok(profile)
    }

    /// Change only the fields that are set, keeping the stored values for the
    /// rest.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn update_profile(
        &self,
        username: &str,
        profile_key: &str,
        fields: ProfileFields,
    ) -> Result<Profile> {
        let current = self.get_profile(username, profile_key).await?;
        let merged = fields.overlay(current);
        self.profiles.save_profile(username, profile_key, &merged).await?;
        Ok(merged)
    }

    /// Section body, or an empty string when no row exists
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn get_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
    ) -> Result<String> {
        Ok(self
            .sections
            .get_section(username, profile_key, section)
            .await?
            .map(|entry| entry.body)
            .unwrap_or_default())
    }

    /// Store a section body (missing body stored as empty) and return the new
    /// update time.
    ///
    /// # Errors
    /// Propagates storage failures.
    #[instrument(skip(self, body))]
    pub async fn save_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: Option<&str>,
    ) -> Result<DateTime<Utc>> {
        let updated_at = self
            .sections
            .save_section(username, profile_key, section, body.unwrap_or_default())
            .await?;
        debug!(%updated_at, "section saved");
        Ok(updated_at)
    }

    /// Everything the profile page shows for one box
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn load_page(&self, username: &str, profile_key: &str) -> Result<ProfilePage> {
        let profile = self.get_profile(username, profile_key).await?;

        let mut sections = Vec::with_capacity(SectionName::ALL.len());
        for name in SectionName::ALL {
            let entry = self.sections.get_section(username, profile_key, name.as_str()).await?;
            let (body, updated_at) =
                entry.map_or_else(|| (String::new(), None), |e| (e.body, e.updated_at));
            sections.push(SectionView { name, body, updated_at });
        }

        Ok(ProfilePage {
            username: username.to_string(),
            profile_key: profile_key.to_string(),
            photo: resolve_photo(&profile),
            profile,
            sections,
        })
    }

    /// The four boxes with their current profile fields, in menu order
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn list_boxes(&self, username: &str) -> Result<Vec<(String, Profile)>> {
        let mut boxes = Vec::with_capacity(PROFILE_KEYS.len());
        for key in PROFILE_KEYS {
            boxes.push((key.to_string(), self.get_profile(username, key).await?));
        }
        Ok(boxes)
    }

    /// Copy a picked image into the photo store and point the profile at it.
    /// Display name and brief are left unchanged.
    ///
    /// # Errors
    /// Returns `Config` when no photo store is configured, `InvalidInput`
    /// when `source` is not a file, and propagates copy/storage failures.
    #[instrument(skip(self))]
    pub async fn import_photo(
        &self,
        username: &str,
        profile_key: &str,
        source: &Path,
    ) -> Result<Profile> {
        let photos = self
            .photos
            .as_ref()
            .ok_or_else(|| ProfileBoxError::Config("photo storage is not configured".into()))?;
        if !source.is_file() {
            return Err(ProfileBoxError::InvalidInput(format!(
                "photo not found: {}",
                source.display()
            )));
        }

        let stored = photos.import(source, username, profile_key).await?;
        let fields = ProfileFields {
            photo_path: Some(stored.to_string_lossy().into_owned()),
            ..ProfileFields::default()
        };
        self.update_profile(username, profile_key, fields).await
    }
}

/// Decide what the photo slot shows: the stored file when it exists,
/// otherwise initials of the display name.
pub fn resolve_photo(profile: &Profile) -> PhotoSource {
    let path = profile.photo_path.trim();
    if !path.is_empty() && Path::new(path).is_file() {
        return PhotoSource::File { path: PathBuf::from(path) };
    }
    PhotoSource::Placeholder { initials: initials(&profile.display_name) }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_photo_falls_back_to_initials() {
        let profile = Profile {
            display_name: "Marc D.".into(),
            brief: String::new(),
            photo_path: "/definitely/not/here.png".into(),
        };
        assert_eq!(resolve_photo(&profile), PhotoSource::Placeholder { initials: "MD".into() });
    }

    #[test]
    fn empty_profile_shows_unknown_initials() {
        assert_eq!(
            resolve_photo(&Profile::default()),
            PhotoSource::Placeholder { initials: "??".into() }
        );
    }

    #[test]
    fn existing_photo_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"png").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        let profile = Profile { photo_path: path.clone(), ..Profile::default() };
        assert_eq!(resolve_photo(&profile), PhotoSource::File { path: PathBuf::from(path) });
    }
}
