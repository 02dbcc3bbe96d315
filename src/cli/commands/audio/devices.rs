use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{CommandArg, CommandMetadata},
    },
    services::audio::{AudioConfigService, AudioDevice, DeviceRole},
};

/// Command to list audio devices known to the server.
///
/// Shows device id, volume, mute state, description and default marker,
/// in the server's own order.
pub struct DevicesCommand {
    audio_service: Arc<AudioConfigService>,
}

impl DevicesCommand {
    /// Creates a new DevicesCommand.
    pub fn new(audio_service: Arc<AudioConfigService>) -> Self {
        Self { audio_service }
    }

    async fn list_role(&self, role: DeviceRole) -> Result<String, CliError> {
        let devices = self
            .audio_service
            .list_devices(role)
            .await
            .map_err(|e| CliError::ServiceError {
                service: "audio".to_string(),
                details: e.to_string(),
            })?;

        Ok(format_device_table(role, &devices))
    }
}

#[async_trait]
impl Command for DevicesCommand {
    /// Lists devices for one role, or for both when no role is given.
    ///
    /// # Errors
    /// Returns [`CliError`] when the role argument is unknown or the audio
    /// service fails.
    async fn execute(&self, args: &[String]) -> CommandResult {
        match args.first() {
            Some(role_arg) => {
                let role: DeviceRole =
                    role_arg.parse().map_err(|_| CliError::InvalidArgument {
                        arg: "role".to_string(),
                        reason: "must be 'sink' or 'source'".to_string(),
                    })?;
                self.list_role(role).await
            }
            None => {
                let sinks = self.list_role(DeviceRole::Sink).await?;
                let sources = self.list_role(DeviceRole::Source).await?;
                Ok(format!("{sinks}\n{sources}"))
            }
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "devices".to_string(),
            description: "List audio devices known to the server".to_string(),
            category: "audio".to_string(),
            args: vec![CommandArg {
                name: "role".to_string(),
                description: "Restrict to 'sink' or 'source'".to_string(),
                required: false,
            }],
            examples: vec![
                "resona audio devices".to_string(),
                "resona audio devices sink".to_string(),
            ],
        }
    }
}

fn format_device_table(role: DeviceRole, devices: &[AudioDevice]) -> String {
    if devices.is_empty() {
        return format!("No {role}s found\n");
    }

    let mut output = format!("Found {} {}(s):\n\n", devices.len(), role);
    output.push_str(&format!(
        "{:<52} {:>5} {:<6} {}\n",
        "ID", "Vol", "Mute", "Description"
    ));
    output.push_str(&format!("{}\n", "-".repeat(78)));

    for device in devices {
        let default_marker = if device.is_default { " (default)" } else { "" };
        let mute = if device.muted { "yes" } else { "no" };

        output.push_str(&format!(
            "{:<52} {:>4}% {:<6} {}{}\n",
            device.id, device.volume_percent, mute, device.display_name, default_marker
        ));
    }

    output
}
