//! Domain types and models

pub mod profile;
pub mod section;

pub use profile::{PhotoSource, Profile, ProfileFields, ProfilePage, ProfileSeed};
pub use section::{SectionEntry, SectionName, SectionView};
