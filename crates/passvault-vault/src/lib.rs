//! Encrypted vault storage for PassVault.
//!
//! Every sensitive field of a vault entry is sealed independently with
//! AES-256-GCM before it reaches the store, and opened again only when the
//! owner reads it back.
//!
//! - [`key`]: loading the process-wide 32-byte key
//! - [`cipher`] / [`envelope`]: single-string authenticated encryption
//! - [`codec`] / [`record`]: field-by-field sealing of vault records
//! - [`store`]: the document store collaborator
//! - [`service`]: owner-scoped create/list/get/update/delete

pub mod cipher;
pub mod codec;
pub mod envelope;
pub mod error;
pub mod key;
pub mod record;
pub mod service;
pub mod store;

pub use cipher::FieldCipher;
pub use codec::RecordCodec;
pub use envelope::Envelope;
pub use error::{Result, VaultError};
pub use key::SecretKey;
pub use record::{
    FieldUpdate, OpenedField, OpenedRecord, PlainRecord, RecordUpdate, SealedField,
    SealedRecord, DECRYPTION_FAILED_SENTINEL,
};
pub use service::{VaultEntry, VaultService};
pub use store::{FileVaultStore, MemoryVaultStore, VaultDocument, VaultStore};
