//! Section types
//!
//! Sections are free-text bodies keyed by name. The four names below are the
//! ones the application shows; storage accepts any name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_name_conversions;

/// Sections shown on the profile page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionName {
    Education,
    Hobbies,
    Skills,
    Message,
}

impl SectionName {
    /// All sections in display order
    pub const ALL: [Self; 4] = [Self::Education, Self::Hobbies, Self::Skills, Self::Message];
}

impl_name_conversions!(SectionName {
    Education => "Education",
    Hobbies => "Hobbies",
    Skills => "Skills",
    Message => "Message",
});

/// A stored section row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub body: String,
    /// `None` when the stored value is missing or unreadable
    pub updated_at: Option<DateTime<Utc>>,
}

/// One section as shown on the profile page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionView {
    pub name: SectionName,
    pub body: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_display_order() {
        let names: Vec<&str> = SectionName::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["Education", "Hobbies", "Skills", "Message"]);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("skills".parse::<SectionName>().unwrap(), SectionName::Skills);
        assert!("Projects".parse::<SectionName>().is_err());
    }
}
