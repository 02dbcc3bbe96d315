use std::time::Duration;

use thiserror::Error;

/// Process-level failures while invoking the audio control executable.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The executable is not installed or not in PATH
    #[error("executable '{program}' not found in PATH")]
    NotFound {
        /// Name of the missing executable
        program: String,
    },

    /// The process ran but exited with a non-zero status
    #[error("process exited with code {code}: {stderr}")]
    NonZeroExit {
        /// Exit code reported by the process
        code: i32,
        /// Captured stderr, trimmed
        stderr: String,
    },

    /// The process did not finish within the configured wall-clock limit
    #[error("process did not finish within {limit:?}")]
    Timeout {
        /// The limit that was exceeded
        limit: Duration,
    },

    /// The process could not be spawned for a reason other than a missing
    /// executable
    #[error("failed to launch process: {details}")]
    Launch {
        /// Underlying OS error description
        details: String,
    },
}

/// Structural failures while interpreting audio server output.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Output bytes are not valid UTF-8
    #[error("output is not valid UTF-8")]
    InvalidUtf8,

    /// An expected field was absent from a device block
    #[error("expected field '{0}' is missing from the output")]
    MissingField(&'static str),

    /// A field was present but its value could not be interpreted
    #[error("field '{field}' has an unparseable value")]
    InvalidValue {
        /// Label of the offending field
        field: &'static str,
    },
}

/// Input-shape failures for caller-supplied device identifiers.
///
/// Reasons are enumerated and never echo the rejected input, so they are
/// safe to log and display verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The id is the empty string
    #[error("device id is empty")]
    Empty,

    /// The id contains a `..` path traversal sequence
    #[error("device id contains a path traversal sequence")]
    PathTraversal,

    /// The id contains a null byte or other control character
    #[error("device id contains control characters")]
    ControlCharacters,

    /// The id exceeds the maximum accepted length
    #[error("device id exceeds {limit} bytes")]
    TooLong {
        /// The enforced upper bound in bytes
        limit: usize,
    },

    /// The id contains characters outside the accepted grammar
    #[error("device id contains characters outside [A-Za-z0-9._-]")]
    DisallowedCharacters,
}

/// State-machine failures during a default-device change.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The requested id is well-formed but no such device exists right now
    #[error("requested device is not present on the audio server")]
    TargetNotFound,

    /// The set-default command itself failed
    #[error("set-default command failed: {0}")]
    ApplyFailed(#[source] CommandError),

    /// The command reported success but the server still shows a different
    /// default device
    #[error("default device did not change to the requested target")]
    VerifyFailed,

    /// The single rollback attempt could not restore the previous default
    #[error("rollback failed to restore the previous default (original failure: {original})")]
    RollbackFailed {
        /// The failure that triggered the rollback in the first place
        original: Box<ConfigurationError>,
    },
}

/// Umbrella error for audio service operations.
#[derive(Error, Debug)]
pub enum AudioError {
    /// The audio control executable failed at the process level
    #[error("audio server command failed: {0}")]
    Command(#[from] CommandError),

    /// The executable produced output this service could not interpret
    #[error("unexpected audio server output: {0}")]
    Parse(#[from] ParseError),

    /// A caller-supplied device id failed validation
    #[error("invalid device id: {0}")]
    Validation(#[from] ValidationError),

    /// A configuration change reached a failing terminal state
    #[error("configuration change failed: {0}")]
    Configuration(#[from] ConfigurationError),
}
