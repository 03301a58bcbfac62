//! Temporary directory helper
//!
//! RAII wrapper around a uniquely named directory under the system temp dir.

// IO errors are self-explanatory for these thin wrappers
#![allow(clippy::missing_errors_doc)]

use std::path::{Path, PathBuf};
use std::{fs, io};

/// Temporary directory that is deleted (with its contents) when dropped
///
/// # Examples
///
/// ```rust,ignore
/// use profilebox_common::testing::TempDir;
///
/// let dir = TempDir::new("profilebox-doc").unwrap();
/// let db_path = dir.db_path("AppData.db");
/// assert!(db_path.starts_with(dir.path()));
/// ```
#[derive(Debug)]
pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    /// Create a new temporary directory named `{prefix}-{uuid}`
    pub fn new(prefix: &str) -> io::Result<Self> {
        let path = std::env::temp_dir().join(format!("{prefix}-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Path to the temporary directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path for a database file inside the directory (not created)
    pub fn db_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Write a file with the given bytes and return its path
    pub fn create_file(&self, name: &str, contents: impl AsRef<[u8]>) -> io::Result<PathBuf> {
        let file_path = self.path.join(name);
        fs::write(&file_path, contents)?;
        Ok(file_path)
    }

    /// Keep the directory on drop and return its path
    pub fn keep(mut self) -> PathBuf {
        std::mem::take(&mut self.path)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        if !self.path.as_os_str().is_empty() && self.path.exists() {
            let _ = fs::remove_dir_all(&self.path);
        }
    }
}
