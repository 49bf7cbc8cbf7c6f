//! Configuration management

use crate::parser::DEFAULT_MAX_DEPTH;
use crate::pipeline::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level
    pub log_level: String,
    /// Deepest allowed `run_after` nesting
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Config {
    /// Reads settings from a YAML file; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Document`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Document(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&text)
    }

    /// Parses settings from YAML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Document`] for invalid YAML.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}
