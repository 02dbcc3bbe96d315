use std::sync::Arc;

use crate::services::audio::AudioConfigService;

use super::{
    CliError, CommandRegistry,
    formatting::{format_command, format_description, format_header},
};

/// High-level service for managing and executing CLI commands.
///
/// Provides a unified interface for command registration, discovery, and
/// execution. The audio service is shared across all commands that touch
/// device state.
pub struct CliService {
    registry: CommandRegistry,
}

impl CliService {
    /// Creates a new CLI service with all available commands registered.
    pub fn new(audio_service: Arc<AudioConfigService>) -> Self {
        let mut registry = CommandRegistry::new(audio_service);
        registry.register_all_commands();

        CliService { registry }
    }

    /// Executes a command by category and name with the provided arguments.
    ///
    /// # Errors
    /// Returns [`CliError::CommandNotFound`] if the command doesn't exist
    /// in the category; execution failures come from the command itself.
    pub async fn execute_command(
        &self,
        category: &str,
        command_name: &str,
        args: &[String],
    ) -> Result<String, CliError> {
        self.registry.execute(category, command_name, args).await
    }

    /// Renders help text for every registered command.
    ///
    /// Used when the user asks for help or provides no command at all.
    pub fn render_help(&self) -> String {
        let mut output = format!("{}\n", format_header("resona commands"));

        for (category, commands) in self.registry.list_commands() {
            output.push_str(&format!("\n{category}\n"));
            for metadata in commands {
                let arg_summary: Vec<String> = metadata
                    .args
                    .iter()
                    .map(|arg| {
                        if arg.required {
                            format!("<{}>", arg.name)
                        } else {
                            format!("[{}]", arg.name)
                        }
                    })
                    .collect();

                output.push_str(&format!(
                    "  {} {}\n      {}\n",
                    format_command(&metadata.name),
                    arg_summary.join(" "),
                    format_description(&metadata.description),
                ));
            }
        }

        output
    }
}
