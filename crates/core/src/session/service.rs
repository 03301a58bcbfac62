//! Login handling
//!
//! Credentials are not checked: any username/password pair that is not
//! blank after trimming is accepted. Logging in seeds the user's default
//! boxes.

use profilebox_domain::{ProfileBoxError, Result};
use tracing::info;

use crate::profile::seeder::{ProfileSeeder, SeedReport};

/// An authenticated user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    /// What the login-time seeding wrote
    pub seeded: SeedReport,
}

/// Accepts logins and prepares the user's data
#[derive(Clone)]
pub struct SessionService {
    seeder: ProfileSeeder,
}

impl SessionService {
    /// Create the service
    pub const fn new(seeder: ProfileSeeder) -> Self {
        Self { seeder }
    }

    /// Log in as `username`.
    ///
    /// The username is trimmed; the password is only checked for presence.
    ///
    /// # Errors
    /// Returns `InvalidInput` when either value is blank and propagates
    /// seeding failures.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username.is_empty() || password.trim().is_empty() {
            return Err(ProfileBoxError::InvalidInput(
                "please enter username and password".into(),
            ));
        }

        let seeded = self.seeder.seed_user(username).await?;
        info!(username, "user logged in");
        Ok(Session { username: username.to_string(), seeded })
    }
}
