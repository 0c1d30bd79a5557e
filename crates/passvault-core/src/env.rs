//! Environment variable handling.

use std::env;
use std::path::Path;

/// Get an environment variable, returning None if not set or empty.
pub fn get_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Load `.env.local` and then `.env` from the working directory.
///
/// Variables already present in the process environment are never
/// overwritten, and the first file to define a key wins.
pub fn load_dotenv() -> Result<(), std::io::Error> {
    for name in [".env.local", ".env"] {
        load_dotenv_file(Path::new(name))?;
    }
    Ok(())
}

/// Load `KEY=value` pairs from a single dotenv file, if it exists.
pub fn load_dotenv_file(path: &Path) -> Result<(), std::io::Error> {
    if !path.exists() {
        return Ok(());
    }

    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loading dotenv file");
    for (key, value) in parse_dotenv(&content) {
        if env::var(key).is_err() {
            env::set_var(key, value);
        }
    }
    Ok(())
}

/// Parse dotenv content into key/value pairs.
fn parse_dotenv(content: &str) -> Vec<(&str, &str)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let key = key.trim().trim_start_matches("export ").trim();
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                .unwrap_or(value);
            (key, value)
        })
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Common environment variable names.
pub mod vars {
    /// Hex-encoded 32-byte vault encryption key.
    pub const PASSVAULT_ENCRYPTION_KEY: &str = "PASSVAULT_ENCRYPTION_KEY";

    /// PassVault home directory override.
    pub const PASSVAULT_HOME: &str = "PASSVAULT_HOME";

    /// PassVault config file override.
    pub const PASSVAULT_CONFIG: &str = "PASSVAULT_CONFIG";

    /// PassVault log filter.
    pub const PASSVAULT_LOG: &str = "PASSVAULT_LOG";
}
