//! Loading of the vault encryption key.
//!
//! The key comes from a single hex-encoded environment variable
//! (`PASSVAULT_ENCRYPTION_KEY` unless configured otherwise) and must decode
//! to exactly 32 bytes. There is no fallback: an absent or malformed key is
//! fatal.

use std::fmt;

use passvault_core::env;
use rand::RngCore;
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, VaultError};

/// Length of the vault key in bytes.
pub const KEY_SIZE: usize = 32;

/// The process-wide 256-bit vault key. Held only in memory.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; KEY_SIZE],
}

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Decode a hex-encoded key.
    pub fn from_hex(hex_key: &str) -> Result<Self> {
        let mut decoded = hex::decode(hex_key.trim())
            .map_err(|e| VaultError::InvalidKeyFormat(format!("not valid hex: {e}")))?;

        if decoded.len() != KEY_SIZE {
            let actual = decoded.len();
            decoded.zeroize();
            return Err(VaultError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual,
            });
        }

        let mut bytes = [0u8; KEY_SIZE];
        bytes.copy_from_slice(&decoded);
        decoded.zeroize();
        Ok(Self { bytes })
    }

    /// Load the key from the named environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let hex_key = env::get_var(var).ok_or_else(|| VaultError::KeyMissing(var.to_string()))?;
        let key = Self::from_hex(&hex_key)?;
        debug!(var, "loaded vault key from environment");
        Ok(key)
    }

    /// Generate a new random key from the OS random source.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Hex-encode the key for handing to an operator. Never log the result.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}
