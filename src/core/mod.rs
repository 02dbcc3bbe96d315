use std::path::Path;

use thiserror::Error;

/// Error types for the resona application shell.
///
/// Audio-domain failures have their own taxonomy under
/// [`crate::services::audio::error`]; this enum covers the surrounding
/// concerns of loading configuration and locating application files.
#[derive(Error, Debug)]
pub enum ResonaError {
    /// TOML parsing error with location context
    #[error("failed to parse TOML at '{location}': {details}")]
    TomlParse {
        /// Location of TOML being parsed (file path or "string")
        location: String,
        /// Parse error details
        details: String,
    },

    /// I/O operation error
    #[error("I/O error on '{path}': {details}")]
    Io {
        /// Path where the I/O error occurred
        path: std::path::PathBuf,
        /// I/O error details
        details: String,
    },

    /// The environment does not define a usable config location
    #[error("could not determine config directory: {0}")]
    NoConfigDir(String),
}

/// A specialized `Result` type for resona shell operations.
pub type Result<T> = std::result::Result<T, ResonaError>;

impl ResonaError {
    /// Creates a TOML parsing error with optional file path context.
    pub fn toml_parse(error: impl std::fmt::Display, path: Option<&Path>) -> Self {
        let location = match path {
            Some(p) => p.to_string_lossy().to_string(),
            None => "string".to_string(),
        };

        ResonaError::TomlParse {
            location,
            details: error.to_string(),
        }
    }

    /// Creates an I/O error with path context.
    pub fn io(error: impl std::fmt::Display, path: &Path) -> Self {
        ResonaError::Io {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
    }
}
