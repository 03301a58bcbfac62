//! SQLite implementation of the profile and section ports.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profilebox_core::{ProfileRepository, SectionRepository};
use profilebox_domain::{
    format_timestamp, next_updated_at, parse_timestamp, Profile, Result, SectionEntry,
};
use rusqlite::{params, OptionalExtension, TransactionBehavior};
use tokio::task;
use tracing::{debug, instrument};

use super::manager::DbManager;
use crate::errors::{map_join_error, map_sql_error};

/// Profile and section storage on the shared SQLite pool
#[derive(Clone)]
pub struct SqliteProfileRepository {
    db: Arc<DbManager>,
}

impl SqliteProfileRepository {
    /// Construct a repository backed by the shared manager.
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn get_profile(&self, username: &str, profile_key: &str) -> Result<Option<Profile>> {
        let db = Arc::clone(&self.db);
        let (username, profile_key) = (username.to_string(), profile_key.to_string());

        task::spawn_blocking(move || -> Result<Option<Profile>> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT DisplayName, Brief, PhotoPath FROM Profiles
                 WHERE Username = ?1 AND ProfileKey = ?2",
                params![username, profile_key],
                |row| {
                    Ok(Profile {
                        display_name: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                        brief: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        photo_path: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                },
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, profile))]
    async fn save_profile(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> Result<()> {
        let db = Arc::clone(&self.db);
        let (username, profile_key) = (username.to_string(), profile_key.to_string());
        let profile = profile.clone();

        task::spawn_blocking(move || -> Result<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO Profiles (Username, ProfileKey, DisplayName, Brief, PhotoPath)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(Username, ProfileKey) DO UPDATE SET
                     DisplayName = excluded.DisplayName,
                     Brief = excluded.Brief,
                     PhotoPath = excluded.PhotoPath",
                params![
                    username,
                    profile_key,
                    profile.display_name,
                    profile.brief,
                    profile.photo_path
                ],
            )
            .map_err(map_sql_error)?;
            debug!("profile saved");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_profile_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        profile: &Profile,
    ) -> Result<bool> {
        let db = Arc::clone(&self.db);
        let (username, profile_key) = (username.to_string(), profile_key.to_string());
        let profile = profile.clone();

        task::spawn_blocking(move || -> Result<bool> {
            let conn = db.get_connection()?;
            let inserted = conn
                .execute(
                    "INSERT INTO Profiles (Username, ProfileKey, DisplayName, Brief, PhotoPath)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(Username, ProfileKey) DO NOTHING",
                    params![
                        username,
                        profile_key,
                        profile.display_name,
                        profile.brief,
                        profile.photo_path
                    ],
                )
                .map_err(map_sql_error)?;
            Ok(inserted == 1)
        })
        .await
        .map_err(map_join_error)?
    }
}

#[async_trait]
impl SectionRepository for SqliteProfileRepository {
    async fn get_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
    ) -> Result<Option<SectionEntry>> {
        let db = Arc::clone(&self.db);
        let (username, profile_key, section) =
            (username.to_string(), profile_key.to_string(), section.to_string());

        task::spawn_blocking(move || -> Result<Option<SectionEntry>> {
            let conn = db.get_connection()?;
            conn.query_row(
                "SELECT Body, UpdatedAt FROM Sections
                 WHERE Username = ?1 AND ProfileKey = ?2 AND Section = ?3",
                params![username, profile_key, section],
                |row| {
                    let updated_at: Option<String> = row.get(1)?;
                    Ok(SectionEntry {
                        body: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                        updated_at: updated_at.as_deref().and_then(parse_timestamp),
                    })
                },
            )
            .optional()
            .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    #[instrument(skip(self, body), fields(body_len = body.len()))]
    async fn save_section(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<DateTime<Utc>> {
        let db = Arc::clone(&self.db);
        let (username, profile_key, section, body) =
            (username.to_string(), profile_key.to_string(), section.to_string(), body.to_string());

        task::spawn_blocking(move || -> Result<DateTime<Utc>> {
            let mut conn = db.get_connection()?;
            // Immediate: the read of the previous timestamp and the write
            // must not interleave with another writer.
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let previous: Option<String> = tx
                .query_row(
                    "SELECT UpdatedAt FROM Sections
                     WHERE Username = ?1 AND ProfileKey = ?2 AND Section = ?3",
                    params![username, profile_key, section],
                    |row| row.get::<_, Option<String>>(0),
                )
                .optional()
                .map_err(map_sql_error)?
                .flatten();

            let updated_at =
                next_updated_at(previous.as_deref().and_then(parse_timestamp), Utc::now());

            tx.execute(
                "INSERT INTO Sections (Username, ProfileKey, Section, Body, UpdatedAt)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT(Username, ProfileKey, Section) DO UPDATE SET
                     Body = excluded.Body,
                     UpdatedAt = excluded.UpdatedAt",
                params![username, profile_key, section, body, format_timestamp(updated_at)],
            )
            .map_err(map_sql_error)?;
            tx.commit().map_err(map_sql_error)?;

            debug!(updated_at = %updated_at, "section saved");
            Ok(updated_at)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_section_if_absent(
        &self,
        username: &str,
        profile_key: &str,
        section: &str,
        body: &str,
    ) -> Result<bool> {
        let db = Arc::clone(&self.db);
        let (username, profile_key, section, body) =
            (username.to_string(), profile_key.to_string(), section.to_string(), body.to_string());

        task::spawn_blocking(move || -> Result<bool> {
            let conn = db.get_connection()?;
            let inserted = conn
                .execute(
                    "INSERT INTO Sections (Username, ProfileKey, Section, Body, UpdatedAt)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(Username, ProfileKey, Section) DO NOTHING",
                    params![username, profile_key, section, body, format_timestamp(Utc::now())],
                )
                .map_err(map_sql_error)?;
            Ok(inserted == 1)
        })
        .await
        .map_err(map_join_error)?
    }
}
