//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for ProfileBox
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ProfileBoxError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for ProfileBoxError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for ProfileBox operations
pub type Result<T> = std::result::Result<T, ProfileBoxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = ProfileBoxError::InvalidInput("username is required".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "InvalidInput");
        assert_eq!(json["message"], "username is required");
    }

    #[test]
    fn io_errors_convert() {
        let err: ProfileBoxError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png").into();
        assert!(matches!(err, ProfileBoxError::Io(ref m) if m.contains("missing.png")));
    }
}
