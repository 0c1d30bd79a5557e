//! AES-256-GCM encryption of single strings.
//!
//! The vault key is never used directly as the cipher key: a field key is
//! derived from it once per [`FieldCipher`] with HKDF-SHA256. A fresh random
//! nonce is drawn for every call, so sealing the same plaintext twice yields
//! unrelated envelopes.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use hkdf::Hkdf;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::envelope::Envelope;
use crate::error::{Result, VaultError};
use crate::key::{SecretKey, KEY_SIZE};

pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;

/// HKDF info string used to domain-separate the field key.
const HKDF_INFO: &[u8] = b"passvault-field-v1";

/// Derive the 256-bit field key from the vault key via HKDF-SHA256.
fn derive_key(key: &SecretKey) -> Result<[u8; KEY_SIZE]> {
    let hk = Hkdf::<Sha256>::new(None, key.as_bytes());
    let mut okm = [0u8; KEY_SIZE];
    hk.expand(HKDF_INFO, &mut okm)
        .map_err(|e| VaultError::EncryptionFailed(format!("key derivation failed: {e}")))?;
    Ok(okm)
}

/// An initialized cipher context.
///
/// Read-only after construction; share it between tasks behind an `Arc`.
#[derive(Clone)]
pub struct FieldCipher {
    aead: Aes256Gcm,
}

impl FieldCipher {
    /// Build a cipher context for `key`.
    pub fn new(key: &SecretKey) -> Result<Self> {
        let mut field_key = derive_key(key)?;
        let aead = Aes256Gcm::new_from_slice(&field_key)
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()));
        field_key.zeroize();
        Ok(Self { aead: aead? })
    }

    /// Seal `plaintext` under a fresh random nonce.
    pub fn encrypt(&self, plaintext: &str) -> Result<Envelope> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

        let ciphertext = self
            .aead
            .encrypt(Nonce::from_slice(&nonce_bytes), plaintext.as_bytes())
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

        Ok(Envelope {
            ciphertext: hex::encode(ciphertext),
            nonce: hex::encode(nonce_bytes),
        })
    }

    /// Open an envelope produced by [`FieldCipher::encrypt`] under the same key.
    ///
    /// Malformed hex, a nonce of the wrong length, a failed authentication
    /// check and non-UTF-8 plaintext all fail with
    /// [`VaultError::DecryptionFailed`].
    pub fn decrypt(&self, envelope: &Envelope) -> Result<String> {
        let nonce_bytes = hex::decode(&envelope.nonce)
            .map_err(|e| VaultError::DecryptionFailed(format!("nonce hex decode failed: {e}")))?;
        if nonce_bytes.len() != NONCE_SIZE {
            return Err(VaultError::DecryptionFailed(format!(
                "nonce must be {NONCE_SIZE} bytes, got {}",
                nonce_bytes.len()
            )));
        }

        let ciphertext = hex::decode(&envelope.ciphertext).map_err(|e| {
            VaultError::DecryptionFailed(format!("ciphertext hex decode failed: {e}"))
        })?;
        if ciphertext.len() < TAG_SIZE {
            return Err(VaultError::DecryptionFailed(
                "ciphertext too short".to_string(),
            ));
        }

        let plaintext = self
            .aead
            .decrypt(Nonce::from_slice(&nonce_bytes), ciphertext.as_slice())
            .map_err(|_| {
                VaultError::DecryptionFailed("authentication failed (wrong key or tampered data)".to_string())
            })?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::DecryptionFailed(format!("invalid UTF-8: {e}")))
    }
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldCipher([REDACTED])")
    }
}
