//! Configuration: the API key and which fields to write
//!
//! ```yaml
//! api_key: "AIza..."
//! fields:
//!   include_description: true
//!   include_video_tags: true
//! ```
//!
//! Every setting is optional; missing ones take their defaults.

use crate::core::FieldConfig;
use crate::error::{Result, TubeMatterError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "tubematter.yaml";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "TUBEMATTER_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// YouTube Data API v3 key
    pub api_key: Option<String>,
    pub fields: FieldConfig,
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TubeMatterError::file_not_found(path));
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content).map_err(|e| TubeMatterError::config(path, e.to_string()))
    }

    /// Load `explicit` if given, else [`DEFAULT_CONFIG_FILE`] from `dir` when
    /// it exists, else the defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = dir.join(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!("using configuration {}", fallback.display());
            Self::load(&fallback)
        } else {
            Ok(Self::default())
        }
    }

    /// Replace the API key when `key` is given and not blank
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    /// The API key, if one is set and not blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
