//! Config save/load roundtrip integration tests.
//!
//! These tests verify that configuration can be serialized, written to disk,
//! and loaded back with identical field values.

use passvault_core::{Config, PasswordPolicy};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passvault.json5");

    let config = Config::default();
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.vault.key_env, config.vault.key_env);
    assert_eq!(loaded.generator, config.generator);
    assert_eq!(loaded.logging.level, config.logging.level);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_config_modify_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("passvault.json5");

    let mut config = Config::default();
    config.vault.store_path = Some(dir.path().join("vault.json"));
    config.generator.length = 24;
    config.generator.symbols = true;
    config.save(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded.vault_path().unwrap(), dir.path().join("vault.json"));

    let policy = PasswordPolicy::from(&loaded.generator);
    assert_eq!(policy.length, 24);
    assert!(policy.symbols);
}

#[test]
fn test_config_parse_json5_with_comments() {
    let config = Config::parse(
        r#"{
            // where the vault lives
            vault: { store_path: "/srv/passvault/vault.json", key_env: "MY_VAULT_KEY" },
            logging: { json: true },
        }"#,
    )
    .unwrap();
    assert_eq!(
        config.vault.store_path,
        Some(PathBuf::from("/srv/passvault/vault.json"))
    );
    assert_eq!(config.vault.key_env, "MY_VAULT_KEY");
    assert!(config.logging.json);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_load_nonexistent() {
    let result = Config::load(Path::new("/nonexistent/passvault.json5"));
    assert!(result.is_err());

    let fallback = Config::load_or_default(Some(Path::new("/nonexistent/passvault.json5")));
    assert!(fallback.is_ok());
}

#[test]
fn test_config_parse_invalid() {
    let result = Config::parse("not valid json");
    assert!(result.is_err());
}
