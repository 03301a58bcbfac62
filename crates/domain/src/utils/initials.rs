//! Placeholder initials for profiles without a photo

use crate::constants::UNKNOWN_INITIALS;

/// Up to two upper-case initials for `name`.
///
/// Multi-word names use the first letter of the first two words; single
/// words use their first two characters. Blank names give `"??"`.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    let Some(first) = words.next() else {
        return UNKNOWN_INITIALS.to_string();
    };

    let picked: String = match words.next() {
        Some(second) => first.chars().take(1).chain(second.chars().take(1)).collect(),
        None => first.chars().take(2).collect(),
    };
    picked.to_uppercase()
}
