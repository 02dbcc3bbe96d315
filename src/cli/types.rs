use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// A command or category was not found in the registry.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// The argument count does not match the command's metadata.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A required argument is missing.
    #[error("Missing argument '{missing}'. Usage: {usage}")]
    MissingArguments {
        /// Name of the missing argument
        missing: String,
        /// Usage line to show the user
        usage: String,
    },

    /// An argument was provided but its value is not acceptable.
    #[error("Invalid value for '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why the value was rejected
        reason: String,
    },

    /// An underlying service operation failed.
    #[error("{service} error: {details}")]
    ServiceError {
        /// Service that failed
        service: String,
        /// Failure details
        details: String,
    },
}

/// Type alias for command execution results.
///
/// All CLI commands return this type, providing either a success message
/// as a String or a [`CliError`] describing what went wrong.
pub type CommandResult = Result<String, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "device_id", "role")
    pub name: String,

    /// Human-readable description of what this argument does
    pub description: String,

    /// Whether this argument is required for command execution
    pub required: bool,
}

/// Complete metadata for a CLI command.
///
/// The single source of truth for a command's identity, arguments and
/// usage examples; the registry uses it for help generation and argument
/// count validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The command name (e.g., "devices", "set-default")
    pub name: String,

    /// Brief description of what this command does
    pub description: String,

    /// Specification of all arguments this command accepts
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text
    pub examples: Vec<String>,

    /// Category this command belongs to (e.g., "audio")
    pub category: String,
}

/// Trait defining the interface for all CLI commands.
///
/// Commands receive their dependencies through their constructors and are
/// responsible for their own argument value validation; the registry only
/// checks argument counts against the metadata.
#[async_trait]
pub trait Command: Send + Sync {
    /// Executes the command with the provided arguments.
    ///
    /// # Errors
    /// Returns [`CliError`] for invalid argument values or underlying
    /// service failures.
    async fn execute(&self, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
