//! Command-line interface for audio device management.
//!
//! Provides a hierarchical command system over the audio configuration
//! service. Commands are organized by category and generate help text
//! from their metadata. The CLI owns argument parsing, exit-code mapping
//! and output formatting; device semantics live in the service layer.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{CliError, Command, CommandResult};
