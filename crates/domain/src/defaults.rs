//! Default content seeded into each profile box
//!
//! Both lookups are total: keys outside `Box1`..`Box4` get generic
//! placeholder content.

use crate::types::{ProfileSeed, SectionName};

const GENERIC_SECTIONS: [(SectionName, &str); 4] = [
    (SectionName::Education, "Add education here."),
    (SectionName::Hobbies, "Add hobbies here."),
    (SectionName::Skills, "Add skills here."),
    (SectionName::Message, "Add your message about kay Sir Bill here."),
];

/// Display name and brief seeded for `profile_key`.
///
/// Unknown keys get an empty seed.
pub const fn default_profile(profile_key: &str) -> ProfileSeed {
    match profile_key.as_bytes() {
        b"Box1" => ProfileSeed {
            display_name: "Lance R.",
            brief: "Hi! I'm Lance. I enjoy Java and C# projects.",
        },
        b"Box2" => ProfileSeed {
            display_name: "Anna C.",
            brief: "Hello, I'm Anna\u{2014}UI/UX enthusiast and coder.",
        },
        b"Box3" => ProfileSeed {
            display_name: "Marc D.",
            brief: "Marc here. I like data and backend APIs.",
        },
        b"Box4" => ProfileSeed {
            display_name: "Kyla P.",
            brief: "Kyla\u{2014}frontend lover, curious about design.",
        },
        _ => ProfileSeed { display_name: "", brief: "" },
    }
}

/// Section bodies seeded for `profile_key`, in display order.
pub const fn default_sections(profile_key: &str) -> [(SectionName, &'static str); 4] {
    match profile_key.as_bytes() {
        b"Box1" => [
            (SectionName::Education, "PUP \u{2014} BSCS (current). Focus: OOP, Data Structures."),
            (SectionName::Hobbies, "Coding Java/C#, rhythm games, podcasts."),
            (SectionName::Skills, "C#, Java, WinForms, SQL, Git."),
            (SectionName::Message, "Salamat, Sir Bill! Your clarity helps a lot."),
        ],
        b"Box2" => [
            (SectionName::Education, "UE \u{2014} IT Program. Focus: UI/UX, Web Basics."),
            (SectionName::Hobbies, "Figma design, journaling, music."),
            (SectionName::Skills, "HTML/CSS/JS basics, Figma, C# beginner."),
            (SectionName::Message, "Thank you, Sir Bill! We appreciate your support."),
        ],
        b"Box3" => [
            (SectionName::Education, "TIP \u{2014} CS major. Focus: DB & APIs."),
            (SectionName::Hobbies, "Data viz, chess, backend challenges."),
            (SectionName::Skills, "Python, SQL, REST, C# console apps."),
            (SectionName::Message, "Thanks, Sir Bill\u{2014}motivating lessons and feedback."),
        ],
        b"Box4" => [
            (SectionName::Education, "PLM \u{2014} SE track. Focus: front-end."),
            (SectionName::Hobbies, "CSS art, React basics, typography."),
            (SectionName::Skills, "UI layout, components, C# WinForms UI."),
            (SectionName::Message, "Sir Bill, thank you! Very inspiring teaching."),
        ],
        _ => GENERIC_SECTIONS,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::constants::PROFILE_KEYS;

    #[test]
    fn each_box_has_distinct_seed() {
        let names: HashSet<&str> =
            PROFILE_KEYS.iter().map(|key| default_profile(key).display_name).collect();
        assert_eq!(names.len(), 4);
        assert_eq!(default_profile("Box1").display_name, "Lance R.");
        assert_eq!(default_profile("Box3").brief, "Marc here. I like data and backend APIs.");
    }

    #[test]
    fn unknown_key_gets_generic_content() {
        assert_eq!(default_profile("Box9"), ProfileSeed { display_name: "", brief: "" });
        assert_eq!(default_sections("Box9")[0], (SectionName::Education, "Add education here."));
        assert_eq!(default_sections("box1"), GENERIC_SECTIONS);
    }

    #[test]
    fn sections_follow_display_order() {
        for key in PROFILE_KEYS {
            let order: Vec<SectionName> = default_sections(key).iter().map(|(n, _)| *n).collect();
            assert_eq!(order, SectionName::ALL);
        }
    }
}
