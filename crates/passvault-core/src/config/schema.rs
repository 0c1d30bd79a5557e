//! Configuration schema definitions.

use crate::env::vars;
use crate::generator::{PasswordPolicy, DEFAULT_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main PassVault configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Vault storage settings.
    #[serde(default)]
    pub vault: VaultConfig,

    /// Default password generator policy.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Vault storage section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault document file. Defaults to `~/.passvault/vault.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Name of the environment variable holding the hex-encoded key.
    ///
    /// The key itself is never written to the config file.
    #[serde(default = "default_key_env")]
    pub key_env: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            store_path: None,
            key_env: default_key_env(),
        }
    }
}

fn default_key_env() -> String {
    vars::PASSVAULT_ENCRYPTION_KEY.to_string()
}

/// Password generator section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default = "default_length")]
    pub length: usize,

    #[serde(default = "default_true")]
    pub numbers: bool,

    #[serde(default = "default_true")]
    pub letters: bool,

    #[serde(default)]
    pub symbols: bool,

    #[serde(default = "default_true")]
    pub exclude_look_alikes: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        PasswordPolicy::default().into()
    }
}

impl From<PasswordPolicy> for GeneratorConfig {
    fn from(policy: PasswordPolicy) -> Self {
        Self {
            length: policy.length,
            numbers: policy.numbers,
            letters: policy.letters,
            symbols: policy.symbols,
            exclude_look_alikes: policy.exclude_look_alikes,
        }
    }
}

impl From<&GeneratorConfig> for PasswordPolicy {
    fn from(config: &GeneratorConfig) -> Self {
        Self {
            length: config.length,
            numbers: config.numbers,
            letters: config.letters,
            symbols: config.symbols,
            exclude_look_alikes: config.exclude_look_alikes,
        }
    }
}

fn default_length() -> usize {
    DEFAULT_LENGTH
}

fn default_true() -> bool {
    true
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `PASSVAULT_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON log lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}
