//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Environment variables, when `PROFILEBOX_DB_PATH` or `PROFILEBOX_DB_URL`
//!    is set
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. Otherwise built-in defaults
//!
//! ## Environment Variables
//! - `PROFILEBOX_DB_BACKEND`: `sqlite` (default) or `postgres`
//! - `PROFILEBOX_DB_PATH`: SQLite database file path
//! - `PROFILEBOX_DB_POOL_SIZE`: Connection pool size (default 4)
//! - `PROFILEBOX_DB_ENCRYPTION_KEY`: SQLCipher key; unset or empty means a
//!   plain SQLite file
//! - `PROFILEBOX_DB_URL`: PostgreSQL connection string
//! - `PROFILEBOX_LOG_LEVEL`: Default log filter
//! - `PROFILEBOX_LOG_JSON`: Emit JSON log lines (true/false)
//! - `PROFILEBOX_PHOTO_DIR`: Directory imported photos are copied into
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./profilebox.{toml,json}` and `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use profilebox_common::error::{CommonError, CommonResult};
use profilebox_domain::{Config, DatabaseBackend, ProfileBoxError, Result};

use crate::errors::map_common_error;

const CONFIG_FILE_NAMES: [&str; 4] =
    ["profilebox.toml", "profilebox.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `ProfileBoxError::Config` if the selected source is invalid. A
/// missing source is not an error; defaults are used instead.
pub fn load() -> Result<Config> {
    let config = if env_configured() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        match probe_config_paths() {
            Some(path) => load_from_file(Some(path))?,
            None => {
                tracing::info!("No configuration found, using defaults");
                Config::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Either `PROFILEBOX_DB_PATH` or `PROFILEBOX_DB_URL` must be set; every
/// other variable falls back to its default.
///
/// # Errors
/// Returns `ProfileBoxError::Config` if neither database variable is set or
/// a value cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    if !env_configured() {
        return Err(ProfileBoxError::Config(
            "Missing required environment variable: PROFILEBOX_DB_PATH or PROFILEBOX_DB_URL"
                .to_string(),
        ));
    }

    let mut config = Config::default();

    if let Some(backend) = env_opt("PROFILEBOX_DB_BACKEND") {
        config.database.backend = backend
            .parse::<DatabaseBackend>()
            .map_err(|e| CommonError::config_field("PROFILEBOX_DB_BACKEND", e))
            .map_err(map_common_error)?;
    } else if std::env::var_os("PROFILEBOX_DB_PATH").is_none() {
        config.database.backend = DatabaseBackend::Postgres;
    }
    if let Some(path) = env_opt("PROFILEBOX_DB_PATH") {
        config.database.path = PathBuf::from(path);
    }
    if let Some(size) = env_opt("PROFILEBOX_DB_POOL_SIZE") {
        config.database.pool_size = size
            .parse::<u32>()
            .map_err(|e| CommonError::config_field("PROFILEBOX_DB_POOL_SIZE", e.to_string()))
            .map_err(map_common_error)?;
    }
    config.database.encryption_key = env_opt("PROFILEBOX_DB_ENCRYPTION_KEY");
    config.database.url = env_opt("PROFILEBOX_DB_URL");

    if let Some(level) = env_opt("PROFILEBOX_LOG_LEVEL") {
        config.logging.level = level;
    }
    config.logging.json = env_bool("PROFILEBOX_LOG_JSON", config.logging.json);

    if let Some(dir) = env_opt("PROFILEBOX_PHOTO_DIR") {
        config.photos.directory = PathBuf::from(dir);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations. Format is detected by
/// file extension.
///
/// # Errors
/// Returns `ProfileBoxError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
///
/// Returns `ProfileBoxError::Io` if the file exists but cannot be read.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(ProfileBoxError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            ProfileBoxError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CommonError::persistence("read config", e.to_string()))
        .map_err(map_common_error)?;

    let mut config = parse_config(&contents, &config_path).map_err(map_common_error)?;
    if config.database.encryption_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        config.database.encryption_key = None;
    }
    Ok(config)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> CommonResult<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match extension {
        "toml" => Ok(toml::from_str(contents)?),
        "json" => Ok(serde_json::from_str(contents)?),
        _ => Err(CommonError::config_field(
            "path",
            format!("Unsupported config format: {extension}"),
        )),
    }
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    let found = candidate_paths(&roots).find(|path| path.is_file());
    found
}

fn candidate_paths(roots: &[PathBuf]) -> impl Iterator<Item = PathBuf> + '_ {
    roots.iter().flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
}

fn env_configured() -> bool {
    env_opt("PROFILEBOX_DB_PATH").is_some() || env_opt("PROFILEBOX_DB_URL").is_some()
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
