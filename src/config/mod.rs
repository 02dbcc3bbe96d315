//! Application configuration.
//!
//! A small TOML file controls which audio control tool is invoked and how
//! long each invocation may run. A missing file falls back to defaults; a
//! malformed file is an error rather than a silent default.

mod paths;

#[cfg(test)]
mod tests;

use std::{fs, time::Duration};

use serde::{Deserialize, Serialize};

pub use paths::ConfigPaths;

use crate::core::{ResonaError, Result};

fn default_command() -> String {
    "pactl".to_string()
}

fn default_timeout_ms() -> u64 {
    5000
}

/// Settings for the external audio control tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioToolConfig {
    /// Executable to invoke, resolved through PATH
    #[serde(default = "default_command")]
    pub command: String,

    /// Wall-clock limit per invocation, in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for AudioToolConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl AudioToolConfig {
    /// Per-invocation timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Root configuration for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Audio control tool settings
    #[serde(default)]
    pub audio: AudioToolConfig,
}

impl Config {
    /// Loads configuration from the default XDG location.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let path = ConfigPaths::main_config()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ResonaError::io(e, path))?;
        toml::from_str(&content).map_err(|e| ResonaError::toml_parse(e, Some(path)))
    }
}
