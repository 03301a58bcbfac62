//! SQLCipher keying
//!
//! A database opened without a key is a plain SQLite file. With a key, the
//! key pragma must be the first statement run on the connection.

use rusqlite::Connection;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::storage::error::{is_wrong_key_message, StorageError, StorageResult};

/// Encryption key, zeroized on drop and redacted from debug output
#[derive(Clone)]
pub struct EncryptionKey(Zeroizing<String>);

impl EncryptionKey {
    /// Wrap a key. Blank keys are rejected.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when the key is empty or whitespace.
    pub fn new(key: impl Into<String>) -> StorageResult<Self> {
        let key = Zeroizing::new(key.into());
        if key.trim().is_empty() {
            return Err(StorageError::InvalidConfig("encryption key cannot be blank".to_string()));
        }
        Ok(Self(key))
    }

    /// Raw key text
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EncryptionKey(***)")
    }
}

/// Apply the SQLCipher key and compatibility pragmas to a fresh connection.
///
/// # Errors
/// Returns `Encryption` when a pragma fails to apply.
pub fn apply_key(conn: &Connection, key: &EncryptionKey) -> StorageResult<()> {
    conn.pragma_update(None, "key", key.expose()).map_err(|e| {
        error!(error = %e, "SQLCipher key setup failed");
        StorageError::Encryption(format!("Failed to set encryption key: {e}"))
    })?;

    conn.pragma_update(None, "cipher_compatibility", 4).map_err(|e| {
        error!(error = %e, "Failed to set cipher_compatibility");
        StorageError::Encryption(format!("Failed to set cipher_compatibility: {e}"))
    })?;

    debug!("SQLCipher key applied");
    Ok(())
}

/// Force a read of the database header so that a wrong key (or a missing key
/// on an encrypted file) surfaces before the pool is handed out.
///
/// # Errors
/// Returns `WrongKeyOrNotEncrypted` when the file cannot be decoded.
pub fn verify_readable(conn: &Connection) -> StorageResult<()> {
    conn.query_row("SELECT count(*) FROM sqlite_master", [], |_| Ok(())).map_err(|e| {
        if is_wrong_key_message(&e.to_string()) {
            error!(error = %e, "Database header could not be read");
            StorageError::WrongKeyOrNotEncrypted
        } else {
            StorageError::from(e)
        }
    })
}
