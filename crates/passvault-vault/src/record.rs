//! Vault record shapes on each side of the encryption boundary.
//!
//! [`PlainRecord`] is what the owner types in, [`SealedRecord`] is what the
//! store keeps, and [`OpenedRecord`] is what comes back out, with each field
//! either readable or visibly marked as unreadable.

use std::fmt;

use passvault_core::SecretString;
use serde::{Deserialize, Serialize};

use crate::cipher::FieldCipher;
use crate::envelope::Envelope;
use crate::error::{Result, VaultError};

/// Shown in place of a field whose envelope failed to open.
pub const DECRYPTION_FAILED_SENTINEL: &str = "[decryption failed]";

/// A vault record in plaintext.
///
/// `url` and `notes` are optional: `None` means never set, which is distinct
/// from `Some("")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainRecord {
    pub title: SecretString,
    pub username: SecretString,
    pub password: SecretString,
    pub url: Option<SecretString>,
    pub notes: Option<SecretString>,
}

impl PlainRecord {
    /// Create a record with the three required fields.
    pub fn new(
        title: impl Into<SecretString>,
        username: impl Into<SecretString>,
        password: impl Into<SecretString>,
    ) -> Self {
        Self {
            title: title.into(),
            username: username.into(),
            password: password.into(),
            url: None,
            notes: None,
        }
    }

    pub fn with_url(mut self, url: impl Into<SecretString>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<SecretString>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Reject records with an empty required field.
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("username", &self.username)?;
        require("password", &self.password)
    }
}

fn require(name: &'static str, value: &SecretString) -> Result<()> {
    if value.expose_secret().trim().is_empty() {
        return Err(VaultError::MissingField(name));
    }
    Ok(())
}

/// One field in its stored form: the JSON encoding of an [`Envelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealedField(String);

impl SealedField {
    /// Encrypt `value` and encode the envelope for storage.
    pub fn seal(cipher: &FieldCipher, value: &SecretString) -> Result<Self> {
        let envelope = cipher.encrypt(value.expose_secret())?;
        Ok(Self(envelope.to_storage()?))
    }

    /// Decode and decrypt the stored envelope.
    pub fn open(&self, cipher: &FieldCipher) -> Result<SecretString> {
        let envelope = Envelope::from_storage(&self.0)?;
        cipher.decrypt(&envelope).map(SecretString::new)
    }

    /// Wrap a raw stored string, e.g. one read back from the store.
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A vault record with every sensitive field sealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedRecord {
    pub title: SealedField,
    pub username: SealedField,
    pub password: SealedField,
    pub url: Option<SealedField>,
    pub notes: Option<SealedField>,
}

/// The outcome of opening one sealed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenedField {
    Value(SecretString),
    /// The envelope was malformed, tampered with, or sealed under another key.
    Failed,
}

impl OpenedField {
    /// The plaintext, if the field opened.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v.expose_secret()),
            Self::Failed => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    /// The plaintext, or [`DECRYPTION_FAILED_SENTINEL`] for a failed field.
    pub fn display_value(&self) -> &str {
        self.value().unwrap_or(DECRYPTION_FAILED_SENTINEL)
    }

    /// Case-insensitive substring match. Failed fields never match.
    pub fn matches(&self, term: &str) -> bool {
        match self {
            Self::Value(v) => v.contains_ignore_case(term),
            Self::Failed => false,
        }
    }
}

impl fmt::Display for OpenedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => fmt::Display::fmt(v, f),
            Self::Failed => f.write_str(DECRYPTION_FAILED_SENTINEL),
        }
    }
}

/// A vault record after opening, field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedRecord {
    pub title: OpenedField,
    pub username: OpenedField,
    pub password: OpenedField,
    pub url: Option<OpenedField>,
    pub notes: Option<OpenedField>,
}

impl OpenedRecord {
    /// Names of the fields that failed to open.
    pub fn failed_fields(&self) -> Vec<&'static str> {
        let mut failed = Vec::new();
        for (name, field) in [
            ("title", Some(&self.title)),
            ("username", Some(&self.username)),
            ("password", Some(&self.password)),
            ("url", self.url.as_ref()),
            ("notes", self.notes.as_ref()),
        ] {
            if field.is_some_and(OpenedField::is_failed) {
                failed.push(name);
            }
        }
        failed
    }

    pub fn is_intact(&self) -> bool {
        self.failed_fields().is_empty()
    }

    /// The plaintext record, if every present field opened.
    pub fn into_plain(self) -> Option<PlainRecord> {
        fn plain(field: OpenedField) -> Option<SecretString> {
            match field {
                OpenedField::Value(v) => Some(v),
                OpenedField::Failed => None,
            }
        }
        fn plain_opt(field: Option<OpenedField>) -> Option<Option<SecretString>> {
            match field {
                None => Some(None),
                Some(f) => plain(f).map(Some),
            }
        }

        Some(PlainRecord {
            title: plain(self.title)?,
            username: plain(self.username)?,
            password: plain(self.password)?,
            url: plain_opt(self.url)?,
            notes: plain_opt(self.notes)?,
        })
    }
}

/// What to do with an optional field during an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate {
    /// Leave the stored envelope untouched.
    #[default]
    Keep,
    /// Replace the stored envelope with a fresh one for this value.
    Set(SecretString),
    /// Remove the field.
    Clear,
}

impl FieldUpdate {
    pub fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }
}

/// A partial update. Only the fields named here are re-encrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub title: Option<SecretString>,
    pub username: Option<SecretString>,
    pub password: Option<SecretString>,
    pub url: FieldUpdate,
    pub notes: FieldUpdate,
}

impl RecordUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<SecretString>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn username(mut self, username: impl Into<SecretString>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<SecretString>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn url(mut self, url: FieldUpdate) -> Self {
        self.url = url;
        self
    }

    pub fn notes(mut self, notes: FieldUpdate) -> Self {
        self.notes = notes;
        self
    }

    /// True when the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.url.is_keep()
            && self.notes.is_keep()
    }

    /// Reject empty updates and blank values for required fields.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(VaultError::NoFieldsToUpdate);
        }
        for (name, value) in [
            ("title", &self.title),
            ("username", &self.username),
            ("password", &self.password),
        ] {
            if let Some(value) = value {
                require(name, value)?;
            }
        }
        Ok(())
    }
}
