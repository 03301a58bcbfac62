//! Storage error types
//!
//! Defines error types for the storage layer, integrating with the common
//! error classification.

use thiserror::Error;

use crate::error::{ErrorClassification, ErrorSeverity};

/// Storage error type
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(String),

    #[error("Database encryption error: {0}")]
    Encryption(String),

    #[error("Wrong encryption key or database not encrypted")]
    WrongKeyOrNotEncrypted,

    #[error("Connection timeout after {0}s")]
    Timeout(u64),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Rusqlite(#[from] rusqlite::Error),

    #[error(transparent)]
    R2d2(#[from] r2d2::Error),
}

/// Storage result type
pub type StorageResult<T> = Result<T, StorageError>;

impl ErrorClassification for StorageError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Connection(_) => true,
            Self::Rusqlite(err) => matches!(
                err.sqlite_error_code(),
                Some(rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked)
            ),
            _ => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Encryption(_) | Self::WrongKeyOrNotEncrypted => ErrorSeverity::Critical,
            Self::Timeout(_) => ErrorSeverity::Warning,
            Self::Connection(_)
            | Self::Query(_)
            | Self::InvalidConfig(_)
            | Self::Io(_)
            | Self::Rusqlite(_)
            | Self::R2d2(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        matches!(self, Self::Encryption(_) | Self::WrongKeyOrNotEncrypted)
    }
}

/// True when a driver message indicates the file is unreadable with the
/// supplied key (or is encrypted and no key was supplied).
pub(crate) fn is_wrong_key_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("file is not a database")
        || lower.contains("file is encrypted")
        || lower.contains("database disk image is malformed")
        || lower.contains("notadb")
}
