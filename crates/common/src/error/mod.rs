//! Common error types and classification
//!
//! [`CommonError`] covers the failures of reading and decoding configuration
//! sources, which every entry point shares. [`ErrorClassification`] is the
//! interface layer errors implement so callers can pick a log level and tell
//! transient failures from fatal ones:
//!
//! ```rust,ignore
//! use profilebox_common::error::{CommonError, CommonResult};
//!
//! fn read_settings(path: &Path) -> CommonResult<Settings> {
//!     let text = std::fs::read_to_string(path)
//!         .map_err(|e| CommonError::persistence("read settings", e.to_string()))?;
//!     Ok(toml::from_str(&text)?)
//! }
//! ```

use std::fmt;

/// Standard result type using `CommonError`
pub type CommonResult<T> = Result<T, CommonError>;

/// Error variants shared by the configuration entry points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// A configuration value is missing or malformed
    Config { message: String, field: Option<String> },

    /// Serialization or deserialization errors
    Serialization { message: String, format: Option<String> },

    /// File I/O errors
    Persistence { message: String, operation: Option<String> },
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { message, field } => match field {
                Some(field) => write!(f, "Configuration error in field '{field}': {message}"),
                None => write!(f, "Configuration error: {message}"),
            },
            Self::Serialization { message, format } => match format {
                Some(format) => write!(f, "Serialization error ({format}): {message}"),
                None => write!(f, "Serialization error: {message}"),
            },
            Self::Persistence { message, operation } => match operation {
                Some(op) => write!(f, "Persistence error during '{op}': {message}"),
                None => write!(f, "Persistence error: {message}"),
            },
        }
    }
}

impl std::error::Error for CommonError {}

impl CommonError {
    /// Configuration error attributed to a field
    pub fn config_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Serialization error tagged with its format (JSON, TOML, ...)
    pub fn serialization_format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization { message: message.into(), format: Some(format.into()) }
    }

    /// Persistence error raised during `operation`
    pub fn persistence(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Persistence { message: message.into(), operation: Some(operation.into()) }
    }
}

/// Standard classification interface implemented by layer errors.
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient (lock contention, timeouts) and may
    /// succeed if attempted again.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level, used for logging decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Check if this is a critical error requiring immediate attention
    /// (schema damage, wrong encryption key).
    fn is_critical(&self) -> bool;
}

/// Error severity levels for logging and alerting
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational, typically for debugging
    Info,
    /// Warning, should be monitored but not critical
    Warning,
    /// Error, requires attention and action
    Error,
    /// Critical, immediate action required
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

impl From<serde_json::Error> for CommonError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization_format("JSON", err.to_string())
    }
}

impl From<toml::de::Error> for CommonError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization_format("TOML", err.to_string())
    }
}
