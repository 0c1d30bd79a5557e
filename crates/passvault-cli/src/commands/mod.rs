//! CLI command implementations.

pub mod config;
pub mod doctor;
pub mod entry;
pub mod generate;
pub mod keygen;

use std::sync::Arc;

use passvault_core::{env, Config};
use passvault_vault::{FileVaultStore, RecordCodec, SecretKey, VaultService};
use tracing::debug;

/// Build a vault service from the configured key and store file.
///
/// Fails before touching the store if the key is missing or malformed.
pub async fn open_service(config: &Config) -> anyhow::Result<VaultService> {
    if let Err(e) = env::load_dotenv() {
        debug!(error = %e, "no .env file loaded");
    }

    let key = SecretKey::from_env(&config.vault.key_env)
        .map_err(|e| anyhow::anyhow!("{}. Run 'passvault keygen' to create a key.", e))?;
    let codec = RecordCodec::from_key(&key)?;

    let path = config.vault_path()?;
    let store = FileVaultStore::open(&path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open vault at {}: {}", path.display(), e))?;

    Ok(VaultService::new(Arc::new(store), codec))
}
