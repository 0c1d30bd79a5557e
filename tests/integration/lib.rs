//! Shared fixtures for PassVault integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use passvault_vault::{FileVaultStore, PlainRecord, RecordCodec, SecretKey, VaultService};

/// The record used across end-to-end scenarios.
pub fn gmail_record() -> PlainRecord {
    PlainRecord::new("Gmail", "a@b.com", "p@ss").with_url("https://gmail.com")
}

/// Path of the vault file inside a scratch directory.
pub fn vault_path(dir: &Path) -> PathBuf {
    dir.join("vault").join("vault.json")
}

/// Open a file-backed service at `path` under `key`.
pub async fn open_service(path: &Path, key: &SecretKey) -> VaultService {
    let store = FileVaultStore::open(path).await.expect("open vault file");
    let codec = RecordCodec::from_key(key).expect("build codec");
    VaultService::new(Arc::new(store), codec)
}
