//! Path resolution utilities.

use crate::env::{get_var, vars};
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the PassVault base directory (`$PASSVAULT_HOME` or `~/.passvault`).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    if let Some(home) = get_var(vars::PASSVAULT_HOME) {
        return Ok(PathBuf::from(home));
    }
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".passvault"))
}

/// Get the main config file path (~/.passvault/passvault.json5).
pub fn config_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("passvault.json5"))
}

/// Get the default vault document file (~/.passvault/vault.json).
pub fn vault_file() -> Result<PathBuf, ConfigError> {
    Ok(base_dir()?.join("vault.json"))
}
