use std::{fmt, str::FromStr};

use serde::Serialize;

/// Error returned when a device role string is neither a sink nor a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown device role, expected 'sink' or 'source'")]
pub struct UnknownRoleError;

/// Role of an audio device on the server.
///
/// The audio server keeps one default device per role; every operation in
/// this service is scoped to a single role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    /// Audio output device (speakers, headphones)
    Sink,
    /// Audio input device (microphone, line-in)
    Source,
}

impl DeviceRole {
    /// Subcommand noun used with `pactl list`.
    pub fn list_subcommand(self) -> &'static str {
        match self {
            DeviceRole::Sink => "sinks",
            DeviceRole::Source => "sources",
        }
    }

    /// Subcommand that prints the current default device for this role.
    pub fn get_default_subcommand(self) -> &'static str {
        match self {
            DeviceRole::Sink => "get-default-sink",
            DeviceRole::Source => "get-default-source",
        }
    }

    /// Subcommand that changes the default device for this role.
    pub fn set_default_subcommand(self) -> &'static str {
        match self {
            DeviceRole::Sink => "set-default-sink",
            DeviceRole::Source => "set-default-source",
        }
    }
}

impl fmt::Display for DeviceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceRole::Sink => write!(f, "sink"),
            DeviceRole::Source => write!(f, "source"),
        }
    }
}

impl FromStr for DeviceRole {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sink" | "output" => Ok(DeviceRole::Sink),
            "source" | "input" => Ok(DeviceRole::Source),
            _ => Err(UnknownRoleError),
        }
    }
}

/// One sink or source known to the audio server.
///
/// Constructed fresh on every query; the server's state can change between
/// calls, so instances are never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioDevice {
    /// Opaque identifier assigned by the audio server
    pub id: String,
    /// Human-readable description, empty when the server provides none
    pub display_name: String,
    /// Volume as a percentage, clamped to 0-100
    pub volume_percent: u8,
    /// Whether the device is muted
    pub muted: bool,
    /// Whether the device is the current default for its role
    pub is_default: bool,
}

/// Snapshot of the default sink and default source at a point in time.
///
/// Immutable once constructed. A snapshot taken before a configuration
/// change serves as the rollback target if the change fails verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceConfiguration {
    default_sink: Option<String>,
    default_source: Option<String>,
}

impl DeviceConfiguration {
    /// Creates a snapshot from the per-role default device ids.
    pub fn new(default_sink: Option<String>, default_source: Option<String>) -> Self {
        Self {
            default_sink,
            default_source,
        }
    }

    /// Returns the default device id for the given role, if one is set.
    pub fn default_for(&self, role: DeviceRole) -> Option<&str> {
        match role {
            DeviceRole::Sink => self.default_sink.as_deref(),
            DeviceRole::Source => self.default_source.as_deref(),
        }
    }
}

/// Caller intent to change the default device for one role.
///
/// Never persisted; lives only for the duration of a single configuration
/// change operation.
#[derive(Debug, Clone)]
pub struct ChangeRequest {
    /// Id of the device that should become the default
    pub target: String,
    /// Role whose default should change
    pub role: DeviceRole,
}

/// Identity of the audio server, as reported by its info command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// Server implementation name, empty when not reported
    pub name: String,
    /// Server version string, empty when not reported
    pub version: String,
}
