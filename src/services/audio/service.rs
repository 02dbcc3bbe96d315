use std::sync::Arc;

use tracing::debug;

use crate::config::AudioToolConfig;

use super::{
    error::{AudioError, CommandError},
    parser,
    runner::{CommandRunner, SystemRunner},
    types::{AudioDevice, DeviceConfiguration, DeviceRole, ServerInfo},
};

/// Audio device configuration service.
///
/// Every query spawns fresh control-tool invocations; nothing is cached,
/// because another process can change the server's state between calls.
/// There is deliberately no persistent server connection to manage.
#[derive(Clone)]
pub struct AudioConfigService {
    runner: Arc<dyn CommandRunner>,
    tool: String,
}

impl AudioConfigService {
    /// Creates a service driving the configured control tool.
    pub fn new(config: &AudioToolConfig) -> Self {
        Self {
            runner: Arc::new(SystemRunner::new(config.timeout())),
            tool: config.command.clone(),
        }
    }

    /// Creates a service with a caller-supplied command runner.
    ///
    /// This is the seam tests use to script the control tool's behavior
    /// without an audio server present.
    pub fn with_runner(runner: Arc<dyn CommandRunner>, tool: impl Into<String>) -> Self {
        Self {
            runner,
            tool: tool.into(),
        }
    }

    /// Lists the devices the server knows for one role, in server order.
    ///
    /// The default flag is merged in from the default-device query; at most
    /// one returned device carries it, even if the server's answers are
    /// momentarily inconsistent.
    ///
    /// # Errors
    /// Returns [`AudioError`] when the control tool fails or its output
    /// cannot be parsed.
    pub async fn list_devices(&self, role: DeviceRole) -> Result<Vec<AudioDevice>, AudioError> {
        let list_raw = self
            .runner
            .run(&self.tool, &["list", role.list_subcommand()])
            .await?;
        let mut devices = parser::parse_device_list(&list_raw)?;

        let default_raw = self
            .runner
            .run(&self.tool, &[role.get_default_subcommand()])
            .await?;
        let default_id = parser::parse_default_id(&default_raw)?;

        mark_default(&mut devices, default_id.as_deref());
        debug!(%role, count = devices.len(), "listed audio devices");

        Ok(devices)
    }

    /// Reads the current default sink and source as an immutable snapshot.
    ///
    /// # Errors
    /// Returns [`AudioError`] when either default query fails.
    pub async fn current_configuration(&self) -> Result<DeviceConfiguration, AudioError> {
        let sink_raw = self
            .runner
            .run(&self.tool, &[DeviceRole::Sink.get_default_subcommand()])
            .await?;
        let source_raw = self
            .runner
            .run(&self.tool, &[DeviceRole::Source.get_default_subcommand()])
            .await?;

        Ok(parser::parse_current_configuration(&sink_raw, &source_raw)?)
    }

    /// Queries the server identity, primarily as a reachability probe.
    ///
    /// # Errors
    /// Returns [`AudioError`] when the server does not answer.
    pub async fn server_info(&self) -> Result<ServerInfo, AudioError> {
        let raw = self.runner.run(&self.tool, &["info"]).await?;

        Ok(parser::parse_server_info(&raw)?)
    }

    /// Issues the set-default command for one role.
    ///
    /// The id must already have passed validation; this is the only place
    /// a device id enters an argument vector.
    pub(super) async fn apply_default(
        &self,
        role: DeviceRole,
        id: &str,
    ) -> Result<(), CommandError> {
        self.runner
            .run(&self.tool, &[role.set_default_subcommand(), id])
            .await
            .map(|_| ())
    }
}

/// Marks the device matching `default_id` as default.
///
/// At most one device per role may be default at any time; the first match
/// wins, which holds the invariant even against a server answer that would
/// name the same id twice.
fn mark_default(devices: &mut [AudioDevice], default_id: Option<&str>) {
    let mut claimed = false;
    for device in devices {
        device.is_default = !claimed && default_id == Some(device.id.as_str());
        claimed = claimed || device.is_default;
    }
}
