//! Vault document storage backends.
//!
//! Defines the [`VaultStore`] trait and two implementations: an in-memory
//! map and a JSON file under `~/.passvault/`. Stores only ever see sealed
//! fields; every query is scoped to the owning user.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{Result, VaultError};
use crate::record::SealedRecord;

/// A stored vault entry: sealed fields plus plaintext metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultDocument {
    pub id: String,
    pub user_id: String,
    #[serde(flatten)]
    pub fields: SealedRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VaultDocument {
    fn owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Async trait for vault storage backends.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Insert a new document. Fails if the id is already taken.
    async fn insert(&self, doc: VaultDocument) -> Result<()>;

    /// All documents owned by `user_id`, newest first.
    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<VaultDocument>>;

    /// The document with `id`, if it exists and is owned by `user_id`.
    async fn find_one(&self, id: &str, user_id: &str) -> Result<Option<VaultDocument>>;

    /// Replace the document with the same id and owner.
    async fn replace(&self, doc: VaultDocument) -> Result<()>;

    /// Delete the document with `id` owned by `user_id`. Returns whether
    /// anything was removed.
    async fn delete(&self, id: &str, user_id: &str) -> Result<bool>;
}

fn insert_into(docs: &mut HashMap<String, VaultDocument>, doc: VaultDocument) -> Result<()> {
    if docs.contains_key(&doc.id) {
        return Err(VaultError::StorageError(format!(
            "duplicate entry id: {}",
            doc.id
        )));
    }
    docs.insert(doc.id.clone(), doc);
    Ok(())
}

fn owned_by(docs: &HashMap<String, VaultDocument>, user_id: &str) -> Vec<VaultDocument> {
    let mut owned: Vec<VaultDocument> = docs
        .values()
        .filter(|d| d.owned_by(user_id))
        .cloned()
        .collect();
    owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    owned
}

fn replace_in(docs: &mut HashMap<String, VaultDocument>, doc: VaultDocument) -> Result<()> {
    match docs.get_mut(&doc.id) {
        Some(existing) if existing.owned_by(&doc.user_id) => {
            *existing = doc;
            Ok(())
        }
        _ => Err(VaultError::NotFound(doc.id)),
    }
}

fn delete_from(docs: &mut HashMap<String, VaultDocument>, id: &str, user_id: &str) -> bool {
    if docs.get(id).is_some_and(|d| d.owned_by(user_id)) {
        docs.remove(id);
        true
    } else {
        false
    }
}

/// In-memory vault store.
#[derive(Default)]
pub struct MemoryVaultStore {
    docs: RwLock<HashMap<String, VaultDocument>>,
}

impl MemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VaultStore for MemoryVaultStore {
    async fn insert(&self, doc: VaultDocument) -> Result<()> {
        let mut docs = self.docs.write().await;
        insert_into(&mut docs, doc)
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<VaultDocument>> {
        let docs = self.docs.read().await;
        Ok(owned_by(&docs, user_id))
    }

    async fn find_one(&self, id: &str, user_id: &str) -> Result<Option<VaultDocument>> {
        let docs = self.docs.read().await;
        Ok(docs.get(id).filter(|d| d.owned_by(user_id)).cloned())
    }

    async fn replace(&self, doc: VaultDocument) -> Result<()> {
        let mut docs = self.docs.write().await;
        replace_in(&mut docs, doc)
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let mut docs = self.docs.write().await;
        Ok(delete_from(&mut docs, id, user_id))
    }
}

/// A file-backed vault store.
///
/// All documents live in one JSON array at `path`. Every mutation rewrites
/// the file atomically (write to a temp file, then rename). The file is
/// created with mode `0600` and its directory with `0700` on Unix.
pub struct FileVaultStore {
    path: PathBuf,
    docs: RwLock<HashMap<String, VaultDocument>>,
}

impl FileVaultStore {
    /// Open the store at `path`, loading existing documents if the file exists.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let docs = if tokio::fs::try_exists(&path).await? {
            let data = tokio::fs::read_to_string(&path).await?;
            let list: Vec<VaultDocument> = serde_json::from_str(&data).map_err(|e| {
                VaultError::StorageError(format!("malformed vault file {}: {e}", path.display()))
            })?;
            debug!(path = %path.display(), count = list.len(), "loaded vault file");
            list.into_iter().map(|d| (d.id.clone(), d)).collect()
        } else {
            debug!(path = %path.display(), "vault file not found, starting empty");
            HashMap::new()
        };

        Ok(Self {
            path,
            docs: RwLock::new(docs),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure the parent directory exists with restrictive permissions.
    async fn ensure_dir(&self) -> Result<()> {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };
        tokio::fs::create_dir_all(dir).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o700);
            tokio::fs::set_permissions(dir, perms).await?;
        }

        Ok(())
    }

    /// Atomically persist `docs`, oldest first.
    async fn save(&self, docs: &HashMap<String, VaultDocument>) -> Result<()> {
        self.ensure_dir().await?;

        let mut list: Vec<&VaultDocument> = docs.values().collect();
        list.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        let json = serde_json::to_string_pretty(&list)?;

        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, json.as_bytes()).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&tmp_path, perms).await?;
        }

        tokio::fs::rename(&tmp_path, &self.path).await?;
        debug!(path = %self.path.display(), count = list.len(), "wrote vault file");
        Ok(())
    }

    /// Persist `next` and only then make it the in-memory state.
    ///
    /// A failed write leaves `current` untouched, so reads keep matching
    /// the file on disk.
    async fn commit(
        &self,
        current: &mut HashMap<String, VaultDocument>,
        next: HashMap<String, VaultDocument>,
    ) -> Result<()> {
        self.save(&next).await?;
        *current = next;
        Ok(())
    }
}

#[async_trait]
impl VaultStore for FileVaultStore {
    async fn insert(&self, doc: VaultDocument) -> Result<()> {
        let mut docs = self.docs.write().await;
        let mut next = docs.clone();
        insert_into(&mut next, doc)?;
        self.commit(&mut docs, next).await
    }

    async fn find_by_owner(&self, user_id: &str) -> Result<Vec<VaultDocument>> {
        let docs = self.docs.read().await;
        Ok(owned_by(&docs, user_id))
    }

    async fn find_one(&self, id: &str, user_id: &str) -> Result<Option<VaultDocument>> {
        let docs = self.docs.read().await;
        Ok(docs.get(id).filter(|d| d.owned_by(user_id)).cloned())
    }

    async fn replace(&self, doc: VaultDocument) -> Result<()> {
        let mut docs = self.docs.write().await;
        let mut next = docs.clone();
        replace_in(&mut next, doc)?;
        self.commit(&mut docs, next).await
    }

    async fn delete(&self, id: &str, user_id: &str) -> Result<bool> {
        let mut docs = self.docs.write().await;
        let mut next = docs.clone();
        if !delete_from(&mut next, id, user_id) {
            return Ok(false);
        }
        debug!(id, "deleting vault entry");
        self.commit(&mut docs, next).await?;
        Ok(true)
    }
}
