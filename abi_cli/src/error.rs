//! Error types for the abi CLI

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("Config file not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// Config file exists but could not be read
    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid config format
    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] serde_yml::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Out-of-range setting
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Could not find home directory")]
    HomeDirectory,
}
