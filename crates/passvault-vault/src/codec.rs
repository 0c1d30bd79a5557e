//! Field-by-field sealing of vault records.

use passvault_core::SecretString;
use tracing::warn;

use crate::cipher::FieldCipher;
use crate::error::Result;
use crate::key::SecretKey;
use crate::record::{
    FieldUpdate, OpenedField, OpenedRecord, PlainRecord, RecordUpdate, SealedField, SealedRecord,
};

/// Applies a [`FieldCipher`] across the five sensitive fields of a record.
///
/// Stateless apart from the cipher; cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RecordCodec {
    cipher: FieldCipher,
}

impl RecordCodec {
    pub fn new(cipher: FieldCipher) -> Self {
        Self { cipher }
    }

    pub fn from_key(key: &SecretKey) -> Result<Self> {
        Ok(Self::new(FieldCipher::new(key)?))
    }

    /// Seal every present field under its own nonce.
    ///
    /// Absent optional fields stay absent; they are never sealed as an
    /// empty string.
    pub fn encrypt_record(&self, plain: &PlainRecord) -> Result<SealedRecord> {
        plain.validate()?;

        Ok(SealedRecord {
            title: self.seal(&plain.title)?,
            username: self.seal(&plain.username)?,
            password: self.seal(&plain.password)?,
            url: self.seal_optional(plain.url.as_ref())?,
            notes: self.seal_optional(plain.notes.as_ref())?,
        })
    }

    /// Open every present field.
    ///
    /// Never fails as a whole: a field that does not open becomes
    /// [`OpenedField::Failed`] and the remaining fields are still returned.
    pub fn decrypt_record(&self, sealed: &SealedRecord) -> OpenedRecord {
        OpenedRecord {
            title: self.open("title", &sealed.title),
            username: self.open("username", &sealed.username),
            password: self.open("password", &sealed.password),
            url: sealed.url.as_ref().map(|f| self.open("url", f)),
            notes: sealed.notes.as_ref().map(|f| self.open("notes", f)),
        }
    }

    /// Merge a partial update into a stored record.
    ///
    /// Only the fields named in `update` get fresh envelopes; every other
    /// envelope is carried over byte for byte.
    pub fn update_record(&self, existing: &SealedRecord, update: &RecordUpdate) -> Result<SealedRecord> {
        update.validate()?;

        Ok(SealedRecord {
            title: self.replace(&existing.title, update.title.as_ref())?,
            username: self.replace(&existing.username, update.username.as_ref())?,
            password: self.replace(&existing.password, update.password.as_ref())?,
            url: self.merge_optional(existing.url.as_ref(), &update.url)?,
            notes: self.merge_optional(existing.notes.as_ref(), &update.notes)?,
        })
    }

    fn seal(&self, value: &SecretString) -> Result<SealedField> {
        SealedField::seal(&self.cipher, value)
    }

    fn seal_optional(&self, value: Option<&SecretString>) -> Result<Option<SealedField>> {
        value.map(|v| self.seal(v)).transpose()
    }

    fn open(&self, field: &'static str, sealed: &SealedField) -> OpenedField {
        match sealed.open(&self.cipher) {
            Ok(value) => OpenedField::Value(value),
            Err(e) => {
                warn!(field, error = %e, "vault field could not be decrypted");
                OpenedField::Failed
            }
        }
    }

    fn replace(&self, existing: &SealedField, value: Option<&SecretString>) -> Result<SealedField> {
        match value {
            Some(v) => self.seal(v),
            None => Ok(existing.clone()),
        }
    }

    fn merge_optional(
        &self,
        existing: Option<&SealedField>,
        update: &FieldUpdate,
    ) -> Result<Option<SealedField>> {
        match update {
            FieldUpdate::Keep => Ok(existing.cloned()),
            FieldUpdate::Set(v) => self.seal(v).map(Some),
            FieldUpdate::Clear => Ok(None),
        }
    }
}
