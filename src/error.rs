//! Error types for the only fallible edges of the game: configuration and assets.
//!
//! Gameplay itself never fails; its invariants are enforced by clamping at
//! the mutation site.

use std::path::PathBuf;

/// Failure to read or validate a [`crate::config::GameConfig`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The values parsed but cannot drive a session.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Failure to resolve a texture before a session starts.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum AssetError {
    #[error("texture not found: {path}")]
    Missing { path: String },
}
