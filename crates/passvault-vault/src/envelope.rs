//! The ciphertext envelope for one encrypted string.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VaultError};

/// One sealed value: AES-256-GCM ciphertext (tag included) and the nonce it
/// was sealed under, both lowercase hex.
///
/// An envelope is self-contained; opening it needs only the envelope and the
/// vault key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Hex-encoded ciphertext followed by the 16-byte authentication tag.
    pub ciphertext: String,

    /// Hex-encoded 12-byte nonce.
    pub nonce: String,
}

impl Envelope {
    /// Encode as the JSON string kept in a document field.
    pub fn to_storage(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| VaultError::EncryptionFailed(e.to_string()))
    }

    /// Parse the JSON string kept in a document field.
    ///
    /// A malformed field is reported as a decryption failure, the same as a
    /// field that parses but does not authenticate.
    pub fn from_storage(stored: &str) -> Result<Self> {
        serde_json::from_str(stored)
            .map_err(|e| VaultError::DecryptionFailed(format!("malformed envelope: {e}")))
    }
}
