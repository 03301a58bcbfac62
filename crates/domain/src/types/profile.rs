//! Profile types
//!
//! A profile is the (display name, brief, photo path) triple stored per
//! (username, profile key).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::section::SectionView;

/// Stored profile fields. Absent columns read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub display_name: String,
    pub brief: String,
    pub photo_path: String,
}

impl Profile {
    /// True when every field is empty, which is also what an absent row
    /// reads as.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_empty() && self.brief.is_empty() && self.photo_path.is_empty()
    }
}

/// Caller-supplied profile values where any field may be missing.
///
/// Missing values are stored as empty strings, not as "keep existing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub display_name: Option<String>,
    pub brief: Option<String>,
    pub photo_path: Option<String>,
}

impl ProfileFields {
    /// Replace missing values with empty strings
    pub fn normalized(self) -> Profile {
        Profile {
            display_name: self.display_name.unwrap_or_default(),
            brief: self.brief.unwrap_or_default(),
            photo_path: self.photo_path.unwrap_or_default(),
        }
    }

    /// Use `self` where set, `base` otherwise.
    pub fn overlay(self, base: Profile) -> Profile {
        Profile {
            display_name: self.display_name.unwrap_or(base.display_name),
            brief: self.brief.unwrap_or(base.brief),
            photo_path: self.photo_path.unwrap_or(base.photo_path),
        }
    }
}

impl From<Profile> for ProfileFields {
    fn from(profile: Profile) -> Self {
        Self {
            display_name: Some(profile.display_name),
            brief: Some(profile.brief),
            photo_path: Some(profile.photo_path),
        }
    }
}

/// Canned profile content inserted by the seeder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileSeed {
    pub display_name: &'static str,
    pub brief: &'static str,
}

impl From<ProfileSeed> for Profile {
    fn from(seed: ProfileSeed) -> Self {
        Self {
            display_name: seed.display_name.to_string(),
            brief: seed.brief.to_string(),
            photo_path: String::new(),
        }
    }
}

/// Everything the profile page shows for one box
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePage {
    pub username: String,
    pub profile_key: String,
    pub profile: Profile,
    pub photo: PhotoSource,
    /// The four known sections, in display order
    pub sections: Vec<SectionView>,
}

/// What to display in the photo slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhotoSource {
    /// A readable image file
    File { path: PathBuf },
    /// No usable file; draw these initials instead
    Placeholder { initials: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_replaces_missing_with_empty() {
        let fields =
            ProfileFields { display_name: None, brief: Some("Bio".into()), photo_path: None };
        assert_eq!(
            fields.normalized(),
            Profile { display_name: String::new(), brief: "Bio".into(), photo_path: String::new() }
        );
    }

    #[test]
    fn overlay_keeps_base_for_missing_fields() {
        let base = Profile {
            display_name: "Anna C.".into(),
            brief: "Old".into(),
            photo_path: "a.png".into(),
        };
        let fields = ProfileFields { brief: Some("New".into()), ..ProfileFields::default() };

        let merged = fields.overlay(base);
        assert_eq!(merged.display_name, "Anna C.");
        assert_eq!(merged.brief, "New");
        assert_eq!(merged.photo_path, "a.png");
    }

    #[test]
    fn default_profile_is_empty() {
        assert!(Profile::default().is_empty());
    }
}
