pub mod devices;
pub mod doctor;
pub mod set_default;
pub mod status;

pub use devices::*;
pub use doctor::*;
pub use set_default::*;
pub use status::*;

use std::sync::Arc;

use crate::{cli::CommandRegistry, services::audio::AudioConfigService};

/// Registers all audio-related commands with the command registry.
///
/// Registers the four boundary operations of the audio subsystem: list
/// devices, show current configuration, change the default device, and
/// run diagnostics.
pub fn register_commands(registry: &mut CommandRegistry, audio_service: &Arc<AudioConfigService>) {
    const CATEGORY_NAME: &str = "audio";

    registry.register_command(
        CATEGORY_NAME,
        Box::new(DevicesCommand::new(audio_service.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(StatusCommand::new(audio_service.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(SetDefaultCommand::new(audio_service.clone())),
    );
    registry.register_command(
        CATEGORY_NAME,
        Box::new(DoctorCommand::new(audio_service.clone())),
    );
}
