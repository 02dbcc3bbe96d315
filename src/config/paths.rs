use std::{env, path::PathBuf};

use crate::core::ResonaError;

/// Utility struct for locating configuration files.
///
/// Follows the XDG Base Directory specification.
pub struct ConfigPaths;

impl ConfigPaths {
    /// Returns the configuration directory for the application.
    ///
    /// Checks `XDG_CONFIG_HOME` first, falls back to `$HOME/.config`, and
    /// appends `resona` to the base directory.
    ///
    /// # Errors
    /// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn config_dir() -> Result<PathBuf, ResonaError> {
        let config_home = env::var("XDG_CONFIG_HOME")
            .or_else(|_| env::var("HOME").map(|home| format!("{home}/.config")))
            .map_err(|_| {
                ResonaError::NoConfigDir(
                    "neither XDG_CONFIG_HOME nor HOME environment variable is set".to_string(),
                )
            })?;

        Ok(PathBuf::from(config_home).join("resona"))
    }

    /// Returns the path to the main configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn main_config() -> Result<PathBuf, ResonaError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}
