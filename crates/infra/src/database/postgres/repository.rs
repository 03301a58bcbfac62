//! PostgreSQL implementation of the profile and section ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profilebox_core::{ProfileRepository, SectionRepository};
use profilebox_domain::{next_updated_at, Profile, Result, SectionEntry};
use tracing::{debug, instrument};

use super::manager::PgManager;
use crate::errors::map_pg_error;

/// Profile and section storage on a PostgreSQL connection
#[derive(Clone)]
pub struct PostgresProfileRepository {
    db: Arc<PgManager>,
}

impl PostgresProfileRepository {
    /// Construct a repository on the shared client.
    pub fn new(db: Arc<PgManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn get_profile(&self, username: &str, profile_key: &str) -> Result<Option<Profile>> {
        let client = self.db.client().await;
        let row = client
            .query_opt(
                "SELECT display_name, brief, photo_path FROM profiles
                 WHERE username = $1 AND profile_key = $2",
                &[&username, &profile_key],
            )
            .await
            .map_err(map_pg_error)?;

        Ok(row.map(|row| Profile {
            display_name: row.get::<_, Option<String>>(0).unwrap_or_default(),
            brief: row.get::<_, Option<String>>(1).unwrap_or_default(),
            photo_path: row.get::<_, Option<String>>(2).unwrap_or_default(),
        }))
    }

    #[instrument(skip(self, profile))]
    async fn save_profile(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> Result<()> {
        let client = self.db.client().await;
        client
            .execute(
                "INSERT INTO profiles (username, profile_key, display_name, brief, photo_path)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (username, profile_key) DO UPDATE SET
                     display_name = EXCLUDED.display_name,
                     brief = EXCLUDED.brief,
                     photo_path = EXCLUDED.photo_path",
                &[
                    &username,
                    &profile_key,
                    &profile.display_name,
                    &profile.brief,
                    &profile.photo_path,
                ],
            )
            .await
            .map_err(map_pg_error)?;
        debug!("profile saved");
        Ok(())
    }

    async fn insert_profile_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> Result<bool> {
        let client = self.db.client().await;
        let inserted = client
            .execute(
                "INSERT INTO profiles (username, profile_key, display_name, brief, photo_path)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (username, profile_key) DO NOTHING",
                &[
                    &username,
                    &profile_key,
                    &profile.display_name,
                    &profile.brief,
                    &profile.photo_path,
                ],
            )
            .await
            .map_err(map_pg_error)?;
        Ok(inserted == 1)
    }
}

#[async_trait]
impl SectionRepository for PostgresProfileRepository {
    async fn get_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
    ) -> Result<Option<SectionEntry>> {
        let client = self.db.client().await;
        let row = client
            .query_opt(
                "SELECT body, updated_at FROM sections
                 WHERE username = $1 AND profile_key = $2 AND section = $3",
                &[&username, &profile_key, &section],
            )
            .await
            .map_err(map_pg_error)?;

        Ok(row.map(|row| SectionEntry {
            body: row.get::<_, Option<String>>(0).unwrap_or_default(),
            updated_at: row.get(1),
        }))
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn save_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<DateTime<Utc>> {
        let mut client = self.db.client().await;
        let tx = client.transaction().await.map_err(map_pg_error)?;

        let previous: Option<DateTime<Utc>> = tx
            .query_opt(
                "SELECT updated_at FROM sections
                 WHERE username = $1 AND profile_key = $2 AND section = $3
                 FOR UPDATE",
                &[&username, &profile_key, &section],
            )
            .await
            .map_err(map_pg_error)?
            .and_then(|row| row.get(0));

        let updated_at = next_updated_at(previous, Utc::now());
        tx.execute(
            "INSERT INTO sections (username, profile_key, section, body, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (username, profile_key, section) DO UPDATE SET
                 body = EXCLUDED.body,
                 updated_at = EXCLUDED.updated_at",
            &[&username, &profile_key, &section, &body, &updated_at],
        )
        .await
        .map_err(map_pg_error)?;
        tx.commit().await.map_err(map_pg_error)?;

        debug!(updated_at = %updated_at, "section saved");
        Ok(updated_at)
    }

    async fn insert_section_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<bool> {
        let client = self.db.client().await;
        let updated_at = next_updated_at(None, Utc::now());
        let inserted = client
            .execute(
                "INSERT INTO sections (username, profile_key, section, body, updated_at)
                 VALUES ($1, $2, $3, $4, $5)
                 ON CONFLICT (username, profile_key, section) DO NOTHING",
                &[&username, &profile_key, &section, &body, &updated_at],
            )
            .await
            .map_err(map_pg_error)?;
        Ok(inserted == 1)
    }
}
