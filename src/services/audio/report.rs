use chrono::Local;
use serde::Serialize;

use super::{
    error::AudioError,
    service::AudioConfigService,
    types::{AudioDevice, DeviceConfiguration, DeviceRole},
};

/// Result of one diagnostics sub-check.
///
/// A failed sub-check is recorded instead of aborting the report; a health
/// tool must still produce output when one subsystem is down.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionOutcome<T> {
    /// The sub-check succeeded
    Ok(T),
    /// The sub-check failed; the error rendered for display
    Failed(String),
}

impl<T> SectionOutcome<T> {
    fn from_result(result: Result<T, AudioError>) -> Self {
        match result {
            Ok(value) => SectionOutcome::Ok(value),
            Err(err) => SectionOutcome::Failed(err.to_string()),
        }
    }

    /// Whether this sub-check succeeded.
    pub fn is_ok(&self) -> bool {
        matches!(self, SectionOutcome::Ok(_))
    }
}

/// Audio server reachability and identity.
#[derive(Debug, Serialize)]
pub struct ServerHealth {
    /// Server implementation name, empty when not reported
    pub name: String,
    /// Server version, empty when not reported
    pub version: String,
}

/// Devices found for one role.
#[derive(Debug, Serialize)]
pub struct DeviceSection {
    /// Number of devices found
    pub count: usize,
    /// The devices, in server order
    pub devices: Vec<AudioDevice>,
}

impl DeviceSection {
    fn new(devices: Vec<AudioDevice>) -> Self {
        Self {
            count: devices.len(),
            devices,
        }
    }
}

/// Aggregated diagnostics over the audio subsystem.
///
/// Serializes to JSON for machine checking; the CLI shell renders the
/// human-readable form.
#[derive(Debug, Serialize)]
pub struct DiagnosticsReport {
    /// When the report was generated, RFC 3339
    pub generated_at: String,
    /// Server reachability probe
    pub server: SectionOutcome<ServerHealth>,
    /// Output devices
    pub sinks: SectionOutcome<DeviceSection>,
    /// Input devices
    pub sources: SectionOutcome<DeviceSection>,
    /// Current default devices
    pub defaults: SectionOutcome<DeviceConfiguration>,
}

impl DiagnosticsReport {
    /// Whether every sub-check succeeded.
    pub fn healthy(&self) -> bool {
        self.server.is_ok() && self.sinks.is_ok() && self.sources.is_ok() && self.defaults.is_ok()
    }
}

impl AudioConfigService {
    /// Aggregates device lists, current configuration and server health
    /// into one report.
    ///
    /// Pure aggregation: each sub-check runs independently and failures
    /// become [`SectionOutcome::Failed`] entries rather than errors.
    pub async fn diagnostics_report(&self) -> DiagnosticsReport {
        let server = SectionOutcome::from_result(self.server_info().await.map(|info| {
            ServerHealth {
                name: info.name,
                version: info.version,
            }
        }));
        let sinks = SectionOutcome::from_result(
            self.list_devices(DeviceRole::Sink)
                .await
                .map(DeviceSection::new),
        );
        let sources = SectionOutcome::from_result(
            self.list_devices(DeviceRole::Source)
                .await
                .map(DeviceSection::new),
        );
        let defaults = SectionOutcome::from_result(self.current_configuration().await);

        DiagnosticsReport {
            generated_at: Local::now().to_rfc3339(),
            server,
            sinks,
            sources,
            defaults,
        }
    }
}
