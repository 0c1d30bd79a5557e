//! Owner-scoped vault operations.
//!
//! Plaintext only exists on the caller's side of this module: records are
//! sealed before they reach the [`VaultStore`] and opened after they leave it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::codec::RecordCodec;
use crate::error::{Result, VaultError};
use crate::record::{OpenedRecord, PlainRecord, RecordUpdate};
use crate::store::{VaultDocument, VaultStore};

/// A decrypted vault entry as returned to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub id: String,
    pub user_id: String,
    pub record: OpenedRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VaultEntry {
    /// Case-insensitive search over title, username, url and notes.
    ///
    /// An empty term matches everything. The password is never searched.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let r = &self.record;
        r.title.matches(term)
            || r.username.matches(term)
            || r.url.as_ref().is_some_and(|f| f.matches(term))
            || r.notes.as_ref().is_some_and(|f| f.matches(term))
    }
}

fn open_document(codec: &RecordCodec, doc: VaultDocument) -> VaultEntry {
    let record = codec.decrypt_record(&doc.fields);
    let failed = record.failed_fields();
    if !failed.is_empty() {
        warn!(id = %doc.id, ?failed, "vault entry has unreadable fields");
    }
    VaultEntry {
        id: doc.id,
        user_id: doc.user_id,
        record,
        created_at: doc.created_at,
        updated_at: doc.updated_at,
    }
}

fn check_owner(user_id: &str) -> Result<()> {
    if user_id.trim().is_empty() {
        return Err(VaultError::MissingField("userId"));
    }
    Ok(())
}

fn check_id(id: &str) -> Result<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| VaultError::InvalidId(id.to_string()))
}

/// Create/list/get/update/delete over a store, enforcing ownership on
/// every call.
#[derive(Clone)]
pub struct VaultService {
    store: Arc<dyn VaultStore>,
    codec: Arc<RecordCodec>,
}

impl VaultService {
    pub fn new(store: Arc<dyn VaultStore>, codec: RecordCodec) -> Self {
        Self {
            store,
            codec: Arc::new(codec),
        }
    }

    /// Seal and store a new entry. Returns the assigned id.
    pub async fn create(&self, user_id: &str, plain: &PlainRecord) -> Result<String> {
        check_owner(user_id)?;
        let fields = self.codec.encrypt_record(plain)?;

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        self.store
            .insert(VaultDocument {
                id: id.clone(),
                user_id: user_id.to_string(),
                fields,
                created_at: now,
                updated_at: now,
            })
            .await?;

        debug!(%id, user_id, "created vault entry");
        Ok(id)
    }

    /// Every entry owned by `user_id`, newest first.
    ///
    /// Decryption runs on the blocking pool. Entries with unreadable fields
    /// are still returned, with those fields marked as failed.
    pub async fn list(&self, user_id: &str) -> Result<Vec<VaultEntry>> {
        check_owner(user_id)?;
        let docs = self.store.find_by_owner(user_id).await?;
        let codec = Arc::clone(&self.codec);

        tokio::task::spawn_blocking(move || {
            docs.into_iter()
                .map(|doc| open_document(&codec, doc))
                .collect()
        })
        .await
        .map_err(|e| VaultError::StorageError(format!("decryption task failed: {e}")))
    }

    /// One entry, if it exists and belongs to `user_id`.
    pub async fn get(&self, id: &str, user_id: &str) -> Result<VaultEntry> {
        let doc = self.fetch(id, user_id).await?;
        Ok(open_document(&self.codec, doc))
    }

    /// Re-seal only the fields named in `update`.
    pub async fn update(&self, id: &str, user_id: &str, update: &RecordUpdate) -> Result<()> {
        update.validate()?;
        let mut doc = self.fetch(id, user_id).await?;

        doc.fields = self.codec.update_record(&doc.fields, update)?;
        doc.updated_at = Utc::now();
        self.store.replace(doc).await?;

        debug!(id, user_id, "updated vault entry");
        Ok(())
    }

    /// Remove an entry. There is no soft delete.
    pub async fn delete(&self, id: &str, user_id: &str) -> Result<()> {
        check_id(id)?;
        check_owner(user_id)?;
        if !self.store.delete(id, user_id).await? {
            return Err(VaultError::NotFound(id.to_string()));
        }
        debug!(id, user_id, "deleted vault entry");
        Ok(())
    }

    async fn fetch(&self, id: &str, user_id: &str) -> Result<VaultDocument> {
        check_id(id)?;
        check_owner(user_id)?;
        self.store
            .find_one(id, user_id)
            .await?
            .ok_or_else(|| VaultError::NotFound(id.to_string()))
    }
}
