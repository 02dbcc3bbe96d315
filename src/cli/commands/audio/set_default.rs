use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::format_warning,
        types::{CommandArg, CommandMetadata},
    },
    services::audio::{AudioConfigService, ChangeOutcome, ChangeRequest, DeviceRole},
};

/// Command to change the default device for a role.
///
/// The change is verified after it is applied and rolled back if the
/// server did not actually honor it; the outcome message says which.
pub struct SetDefaultCommand {
    audio_service: Arc<AudioConfigService>,
}

impl SetDefaultCommand {
    /// Creates a new SetDefaultCommand.
    pub fn new(audio_service: Arc<AudioConfigService>) -> Self {
        Self { audio_service }
    }
}

#[async_trait]
impl Command for SetDefaultCommand {
    /// Sets the default device for the given role (sink when omitted).
    ///
    /// # Errors
    /// Returns [`CliError`] when arguments are invalid or the change does
    /// not commit; the error names the failing phase and cause.
    async fn execute(&self, args: &[String]) -> CommandResult {
        let target = args.first().ok_or_else(|| CliError::MissingArguments {
            missing: "device_id".to_string(),
            usage: "resona audio set-default <device_id> [sink|source]".to_string(),
        })?;

        let role = match args.get(1) {
            Some(role_arg) => role_arg.parse().map_err(|_| CliError::InvalidArgument {
                arg: "role".to_string(),
                reason: "must be 'sink' or 'source'".to_string(),
            })?,
            None => DeviceRole::Sink,
        };

        let request = ChangeRequest {
            target: target.clone(),
            role,
        };

        match self.audio_service.set_default_device(&request).await {
            ChangeOutcome::Committed { configuration } => {
                let id = configuration.default_for(role).unwrap_or(target.as_str());
                Ok(format!("Default {role} is now {id}"))
            }
            ChangeOutcome::RolledBack { restored, cause } => {
                let previous = restored.default_for(role).unwrap_or("(none)");
                Err(CliError::ServiceError {
                    service: "audio".to_string(),
                    details: format!(
                        "{}; {}",
                        cause,
                        format_warning(&format!("previous default {previous} was restored"))
                    ),
                })
            }
            ChangeOutcome::Failed { phase, cause } => Err(CliError::ServiceError {
                service: "audio".to_string(),
                details: format!("change failed while {phase}: {cause}"),
            }),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "set-default".to_string(),
            description: "Change the default device for a role".to_string(),
            category: "audio".to_string(),
            args: vec![
                CommandArg {
                    name: "device_id".to_string(),
                    description: "Id of the device to make default".to_string(),
                    required: true,
                },
                CommandArg {
                    name: "role".to_string(),
                    description: "'sink' (default) or 'source'".to_string(),
                    required: false,
                },
            ],
            examples: vec![
                "resona audio set-default alsa_output.usb-Headset-00.analog-stereo".to_string(),
                "resona audio set-default alsa_input.pci-0000_00_1f.3.analog-stereo source"
                    .to_string(),
            ],
        }
    }
}
