//! Error types for the vault layer.

use thiserror::Error;

/// Errors that can occur during vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Encryption key is missing: set {0}")]
    KeyMissing(String),

    #[error("Invalid encryption key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("Invalid encryption key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid entry id: {0}")]
    InvalidId(String),

    #[error("Entry not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VaultError {
    /// Whether the process cannot serve any vault operation after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::KeyMissing(_) | Self::InvalidKeyLength { .. } | Self::InvalidKeyFormat(_)
        )
    }
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
