//! Application constants

/// The four profile boxes every user gets, in menu order.
pub const PROFILE_KEYS: [&str; 4] = ["Box1", "Box2", "Box3", "Box4"];

/// Key assigned to rows carried over from the single-profile schema.
pub const LEGACY_PROFILE_KEY: &str = "Box1";

/// Default SQLite database file name, relative to the working directory.
pub const DEFAULT_DB_FILE: &str = "AppData.db";

/// Default directory for imported profile photos.
pub const DEFAULT_PHOTO_DIR: &str = "ProfileImages";

/// Placeholder initials shown when a profile has no usable name.
pub const UNKNOWN_INITIALS: &str = "??";
