//! Configuration loading and persistence.

use super::Config;
use crate::error::ConfigError;
use crate::generator::{MAX_LENGTH, MIN_LENGTH};
use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

impl Config {
    /// Load configuration from `path`, or the default path when `None`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => paths::config_file()?,
        };
        match Self::load(&path) {
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse configuration from a string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        json5::from_str(content).map_err(|e| ConfigError::Json5(e.to_string()))
    }

    /// Save configuration to a file path.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_json5()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write atomically
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;
        debug!(path = %path.display(), "saved config");

        Ok(())
    }

    /// Serialize to JSON5 string.
    pub fn to_json5(&self) -> Result<String, ConfigError> {
        // json5 has no serializer; plain JSON is valid JSON5
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Resolve the vault document file.
    pub fn vault_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.vault.store_path {
            Some(path) => Ok(path.clone()),
            None => paths::vault_file(),
        }
    }

    /// Validate the configuration, collecting all errors before returning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.vault.key_env.trim().is_empty() {
            errors.push("vault.key_env must name an environment variable".to_string());
        }

        if let Some(path) = &self.vault.store_path {
            if path.as_os_str().is_empty() {
                errors.push("vault.store_path must not be empty when set".to_string());
            }
        }

        let generator = &self.generator;
        if !(MIN_LENGTH..=MAX_LENGTH).contains(&generator.length) {
            errors.push(format!(
                "generator.length must be {}-{}, got {}",
                MIN_LENGTH, MAX_LENGTH, generator.length
            ));
        }
        if !generator.numbers && !generator.letters && !generator.symbols {
            errors.push("generator must enable at least one character type".to_string());
        }

        if self.logging.level.trim().is_empty() {
            errors.push("logging.level must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vault.key_env, "PASSVAULT_ENCRYPTION_KEY");
        assert_eq!(config.generator.length, 12);
        assert!(config.generator.exclude_look_alikes);
        assert!(!config.generator.symbols);
    }

    #[test]
    fn test_parse_json5_with_comments() {
        let config = Config::parse(
            r#"{
                // custom store location
                vault: { store_path: "/tmp/vault.json" },
                generator: { length: 20, symbols: true },
            }"#,
        )
        .unwrap();

        assert_eq!(config.vault.store_path, Some(PathBuf::from("/tmp/vault.json")));
        assert_eq!(config.vault.key_env, "PASSVAULT_ENCRYPTION_KEY");
        assert_eq!(config.generator.length, 20);
        assert!(config.generator.symbols);
        assert!(config.generator.letters);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut config = Config::default();
        config.vault.key_env = String::new();
        config.generator.length = 100;
        config.generator.numbers = false;
        config.generator.letters = false;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("key_env"), "{err}");
        assert!(err.contains("generator.length"), "{err}");
        assert!(err.contains("at least one character type"), "{err}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.json5");
        assert!(matches!(Config::load(&missing), Err(ConfigError::NotFound(_))));

        let config = Config::load_or_default(Some(&missing)).unwrap();
        assert_eq!(config.generator.length, 12);
    }

    #[test]
    fn test_vault_path_override() {
        let mut config = Config::default();
        config.vault.store_path = Some(PathBuf::from("/data/vault.json"));
        assert_eq!(config.vault_path().unwrap(), PathBuf::from("/data/vault.json"));
    }
}
