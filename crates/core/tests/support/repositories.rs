//! In-memory implementations of the core ports
//!
//! Deterministic stand-ins for the SQL repositories so service tests run
//! without a database.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profilebox_core::{PhotoStore, ProfileRepository, SectionRepository};
use profilebox_domain::{next_updated_at, Profile, Result as DomainResult, SectionEntry};

type ProfileKey = (String, String);
type SectionKey = (String, String, String);

/// Both repository ports over hash maps.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    profiles: Arc<Mutex<HashMap<ProfileKey, Profile>>>,
    sections: Arc<Mutex<HashMap<SectionKey, SectionEntry>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile_count(&self) -> usize {
        self.profiles.lock().unwrap().len()
    }

    pub fn section_count(&self) -> usize {
        self.sections.lock().unwrap().len()
    }
}

fn pkey(username: &str, profile_key: &str) -> ProfileKey {
    (username.to_string(), profile_key.to_string())
}

fn skey(username: &str, profile_key: &str, section: &str) -> SectionKey {
    (username.to_string(), profile_key.to_string(), section.to_string())
}

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn get_profile(&self, username: &str, profile_key: &str) -> DomainResult<Option<Profile>> {
        Ok(self.profiles.lock().unwrap().get(&pkey(username, profile_key)).cloned())
    }

    async fn save_profile(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> DomainResult<()> {
        self.profiles.lock().unwrap().insert(pkey(username, profile_key), profile.clone());
        Ok(())
    }

    async fn insert_profile_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> DomainResult<bool> {
        let mut profiles = self.profiles.lock().unwrap();
        let key = pkey(username, profile_key);
        if profiles.contains_key(&key) {
            return Ok(false);
        }
        profiles.insert(key, profile.clone());
        Ok(true)
    }
}

#[async_trait]
impl SectionRepository for InMemoryStore {
    async fn get_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
    ) -> DomainResult<Option<SectionEntry>> {
        Ok(self.sections.lock().unwrap().get(&skey(username, profile_key, section)).cloned())
    }

    async fn save_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> DomainResult<DateTime<Utc>> {
        let mut sections = self.sections.lock().unwrap();
        let key = skey(username, profile_key, section);
        let previous = sections.get(&key).and_then(|entry| entry.updated_at);
        let updated_at = next_updated_at(previous, Utc::now());
        sections.insert(key, SectionEntry { body: body.to_string(), updated_at: Some(updated_at) });
        Ok(updated_at)
    }

    async fn insert_section_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> DomainResult<bool> {
        let mut sections = self.sections.lock().unwrap();
        let key = skey(username, profile_key, section);
        if sections.contains_key(&key) {
            return Ok(false);
        }
        sections.insert(key, SectionEntry { body: body.to_string(), updated_at: Some(Utc::now()) });
        Ok(true)
    }
}

/// Photo store that records imports instead of copying files.
#[derive(Default, Clone)]
pub struct RecordingPhotoStore {
    pub imports: Arc<Mutex<Vec<(PathBuf, String, String)>>>,
}

#[async_trait]
impl PhotoStore for RecordingPhotoStore {
    async fn import(
        &self,
        source: &Path,
        username: &str,
        profile_key: &str,
    ) -> DomainResult<PathBuf> {
        self.imports.lock().unwrap().push((
            source.to_path_buf(),
            username.to_string(),
            profile_key.to_string(),
        ));
        let ext = source.extension().and_then(|e| e.to_str()).unwrap_or("png");
        Ok(PathBuf::from(format!("/photos/{username}_{profile_key}.{ext}")))
    }
}
