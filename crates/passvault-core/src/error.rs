//! Error types for PassVault core.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON5 parse error: {0}")]
    Json5(String),
}

/// Password generator errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Select at least one character type")]
    EmptyCharset,

    #[error("Password length must be between {min} and {max}, got {length}")]
    InvalidLength { length: usize, min: usize, max: usize },
}
