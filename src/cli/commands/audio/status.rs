use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::CommandMetadata,
    },
    services::audio::{AudioConfigService, DeviceRole},
};

/// Command to show the current default sink and source.
///
/// Resolves each default against the device list so volume and mute state
/// can be shown alongside the id.
pub struct StatusCommand {
    audio_service: Arc<AudioConfigService>,
}

impl StatusCommand {
    /// Creates a new StatusCommand.
    pub fn new(audio_service: Arc<AudioConfigService>) -> Self {
        Self { audio_service }
    }

    async fn describe_role(&self, role: DeviceRole) -> Result<String, CliError> {
        let devices = self
            .audio_service
            .list_devices(role)
            .await
            .map_err(|e| CliError::ServiceError {
                service: "audio".to_string(),
                details: e.to_string(),
            })?;

        let line = match devices.iter().find(|d| d.is_default) {
            Some(device) => {
                let mute = if device.muted { "muted" } else { "unmuted" };
                let name = if device.display_name.is_empty() {
                    String::new()
                } else {
                    format!("{} - ", device.display_name)
                };
                format!(
                    "{} ({}volume {}%, {})",
                    device.id, name, device.volume_percent, mute
                )
            }
            None => "(none)".to_string(),
        };

        Ok(format!("Default {:>6}: {}", role.to_string(), line))
    }
}

#[async_trait]
impl Command for StatusCommand {
    /// Shows the default device for both roles.
    ///
    /// # Errors
    /// Returns [`CliError`] if the audio service fails for either role.
    async fn execute(&self, _args: &[String]) -> CommandResult {
        let sink = self.describe_role(DeviceRole::Sink).await?;
        let source = self.describe_role(DeviceRole::Source).await?;

        Ok(format!("{sink}\n{source}"))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "status".to_string(),
            description: "Show the current default sink and source".to_string(),
            category: "audio".to_string(),
            args: vec![],
            examples: vec!["resona audio status".to_string()],
        }
    }
}
