//! Conversions from external infrastructure errors into domain errors.

use profilebox_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use profilebox_common::storage::StorageError;
use profilebox_domain::ProfileBoxError;
use rusqlite::Error as SqlError;
use tokio_postgres::error::SqlState;
use tokio_postgres::Error as PgError;
use tracing::{debug, error, warn};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ProfileBoxError);

impl From<InfraError> for ProfileBoxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ProfileBoxError> for InfraError {
    fn from(value: ProfileBoxError) -> Self {
        InfraError(value)
    }
}

trait IntoProfileBoxError {
    fn into_profilebox(self) -> ProfileBoxError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → ProfileBoxError */
/* -------------------------------------------------------------------------- */

impl IntoProfileBoxError for SqlError {
    fn into_profilebox(self) -> ProfileBoxError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        fn looks_like_wrong_key(message: &str) -> bool {
            let lower = message.to_ascii_lowercase();
            lower.contains("not a database") || lower.contains("encrypted")
        }

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        ProfileBoxError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        ProfileBoxError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 1555 | 2067) => {
                        ProfileBoxError::Database("unique constraint violation".into())
                    }
                    (ErrorCode::NotADatabase, _) => ProfileBoxError::Database(
                        "SQLCipher key rejected or database not encrypted".into(),
                    ),
                    (_, _) if looks_like_wrong_key(&message) => ProfileBoxError::Database(
                        "SQLCipher key rejected or database not encrypted".into(),
                    ),
                    _ => ProfileBoxError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => ProfileBoxError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                ProfileBoxError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                ProfileBoxError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::Utf8Error(_) => {
                ProfileBoxError::Database("invalid UTF-8 returned from sqlite".into())
            }
            RE::InvalidPath(path) => ProfileBoxError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => ProfileBoxError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_profilebox())
    }
}

/* -------------------------------------------------------------------------- */
/* tokio_postgres::Error → ProfileBoxError */
/* -------------------------------------------------------------------------- */

impl IntoProfileBoxError for PgError {
    fn into_profilebox(self) -> ProfileBoxError {
        if self.is_closed() {
            return ProfileBoxError::Database("postgres connection closed".into());
        }

        match self.code() {
            Some(code) if *code == SqlState::UNIQUE_VIOLATION => {
                ProfileBoxError::Database("unique constraint violation".into())
            }
            Some(code) if *code == SqlState::T_R_SERIALIZATION_FAILURE => {
                ProfileBoxError::Database("serialization failure, retry the operation".into())
            }
            Some(code) if *code == SqlState::INVALID_PASSWORD => {
                ProfileBoxError::Database("postgres authentication failed".into())
            }
            Some(code) => ProfileBoxError::Database(format!(
                "postgres error {}: {}",
                code.code(),
                self.as_db_error().map_or_else(|| self.to_string(), |db| db.message().to_string())
            )),
            None => ProfileBoxError::Database(format!("postgres error: {self}")),
        }
    }
}

impl From<PgError> for InfraError {
    fn from(value: PgError) -> Self {
        InfraError(value.into_profilebox())
    }
}

/* -------------------------------------------------------------------------- */
/* StorageError → ProfileBoxError */
/* -------------------------------------------------------------------------- */

impl IntoProfileBoxError for StorageError {
    fn into_profilebox(self) -> ProfileBoxError {
        let retryable = self.is_retryable();
        match self {
            StorageError::Rusqlite(err) => err.into_profilebox(),
            StorageError::InvalidConfig(message) => ProfileBoxError::Config(message),
            StorageError::Io(err) => ProfileBoxError::Io(err.to_string()),
            other if retryable => ProfileBoxError::Database(format!("{other} (retryable)")),
            other => ProfileBoxError::Database(other.to_string()),
        }
    }
}

impl From<StorageError> for InfraError {
    fn from(value: StorageError) -> Self {
        InfraError(value.into_profilebox())
    }
}

/* -------------------------------------------------------------------------- */
/* CommonError → ProfileBoxError */
/* -------------------------------------------------------------------------- */

impl IntoProfileBoxError for CommonError {
    fn into_profilebox(self) -> ProfileBoxError {
        match self {
            CommonError::Persistence { .. } => ProfileBoxError::Io(self.to_string()),
            CommonError::Config { .. } | CommonError::Serialization { .. } => {
                ProfileBoxError::Config(self.to_string())
            }
        }
    }
}

impl From<CommonError> for InfraError {
    fn from(value: CommonError) -> Self {
        InfraError(value.into_profilebox())
    }
}

pub(crate) fn map_sql_error(err: SqlError) -> ProfileBoxError {
    ProfileBoxError::from(InfraError::from(err))
}

pub(crate) fn map_pg_error(err: PgError) -> ProfileBoxError {
    ProfileBoxError::from(InfraError::from(err))
}

/// Convert a pool error, logging it at the level its classification asks for.
pub(crate) fn map_storage_error(err: StorageError) -> ProfileBoxError {
    let severity = err.severity();
    if err.is_critical() {
        error!(error = %err, %severity, "storage failure");
    } else if severity >= ErrorSeverity::Error {
        warn!(error = %err, %severity, "storage error");
    } else {
        debug!(error = %err, %severity, retryable = err.is_retryable(), "transient storage error");
    }
    ProfileBoxError::from(InfraError::from(err))
}

pub(crate) fn map_common_error(err: CommonError) -> ProfileBoxError {
    ProfileBoxError::from(InfraError::from(err))
}

pub(crate) fn map_join_error(err: tokio::task::JoinError) -> ProfileBoxError {
    ProfileBoxError::Internal(format!("Task join error: {err}"))
}
