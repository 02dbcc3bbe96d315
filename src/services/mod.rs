/// Audio device configuration and diagnostics service
pub mod audio;

pub use audio::{
    AudioConfigService, AudioDevice, AudioError, ChangeOutcome, ChangePhase, ChangeRequest,
    CommandRunner, DeviceConfiguration, DeviceRole, DiagnosticsReport, RawOutput,
};
