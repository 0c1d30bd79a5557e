//! # passvault-core
//!
//! Core types, configuration, and utilities for PassVault.
//!
//! This crate provides shared functionality used across all PassVault crates:
//!
//! - **Configuration**: Loading, validation, and persistence of the config file
//! - **Secrets**: [`SecretString`] for plaintext that must never be logged
//! - **Generator**: Charset-based random password generation
//! - **Utilities**: Path resolution and environment handling

pub mod config;
pub mod env;
pub mod error;
pub mod generator;
pub mod paths;
pub mod secret;

// Re-exports for convenience
pub use config::Config;
pub use error::{ConfigError, GeneratorError};
pub use generator::{PasswordPolicy, Strength};
pub use secret::SecretString;
