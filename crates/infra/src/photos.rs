//! Filesystem photo store
//!
//! Picked photos are copied into one directory under a name derived from the
//! owner and box, so a box has at most one stored photo and re-importing
//! replaces it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use profilebox_core::PhotoStore;
use profilebox_domain::{PhotoConfig, ProfileBoxError, Result};
use tokio::task;
use tracing::info;

use crate::errors::map_join_error;

/// Copies photos into a local directory
#[derive(Debug, Clone)]
pub struct FsPhotoStore {
    directory: PathBuf,
}

impl FsPhotoStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn from_config(config: &PhotoConfig) -> Self {
        Self::new(&config.directory)
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `{username}_{profileKey}{.ext}`, keeping the source extension
    fn file_name(source: &Path, username: &str, profile_key: &str) -> String {
        let extension = source
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        format!("{}_{}{extension}", sanitize(username), sanitize(profile_key))
    }
}

/// Keep names usable as a single path component
fn sanitize(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect()
}

#[async_trait]
impl PhotoStore for FsPhotoStore {
    async fn import(&self, source: &Path, username: &str, profile_key: &str) -> Result<PathBuf> {
        let source = source.to_path_buf();
        let directory = self.directory.clone();
        let file_name = Self::file_name(&source, username, profile_key);

        task::spawn_blocking(move || -> Result<PathBuf> {
            if !source.is_file() {
                return Err(ProfileBoxError::InvalidInput(format!(
                    "photo source is not a file: {}",
                    source.display()
                )));
            }

            std::fs::create_dir_all(&directory)?;
            let destination = directory.join(file_name);
            std::fs::copy(&source, &destination)?;
            let destination = destination.canonicalize()?;

            info!(destination = %destination.display(), "photo imported");
            Ok(destination)
        })
        .await
        .map_err(map_join_error)?
    }
}
