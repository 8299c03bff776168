//! Configuration management for the abi CLI

use abi_encode::EncoderConfig;
use abi_plan::Network;
use abi_types::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

use crate::error::ConfigError;

/// Configuration structure for the abi CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Network whose explorer receives verification requests
    pub network: Network,

    /// Explorer base URL; overrides the network default when set
    pub explorer_url: Option<String>,

    /// Maximum array nesting accepted in parameter types
    pub max_type_depth: usize,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: Network::default(),
            explorer_url: None,
            max_type_depth: DEFAULT_MAX_DEPTH,
            pretty: false,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A missing default file yields the defaults; a missing explicit file
    /// is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config_path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path()?, false),
        };

        if !config_path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path: config_path });
            }
            debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        debug!(path = %config_path.display(), network = %config.network, "loaded config");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        /* An empty document deserializes as null */
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home_dir = dirs::home_dir().ok_or(ConfigError::HomeDirectory)?;
        Ok(home_dir.join(".abi-verify").join("config.yaml"))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(explorer_url) = &self.explorer_url {
            validate_explorer_url(explorer_url)?;
        }
        if self.max_type_depth == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_type_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Explorer base URL: `explorer_url` when set, else the network default
    pub fn explorer_base_url(&self) -> &str {
        self.explorer_url
            .as_deref()
            .unwrap_or_else(|| self.network.explorer_base_url())
    }

    pub fn encoder_config(&self) -> EncoderConfig {
        EncoderConfig {
            max_type_depth: self.max_type_depth,
        }
    }
}

/// Explorer URLs must be absolute http(s) URLs
pub fn validate_explorer_url(explorer_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(explorer_url).map_err(|e| ConfigError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl(format!(
            "unsupported scheme '{other}' in {explorer_url}"
        ))),
    }
}
