//! Shared test double for the audio control tool.
//!
//! [`FakePactl`] implements [`CommandRunner`] by interpreting the same
//! argument vectors the real service issues and answering with output in
//! the control tool's text format. Knobs simulate the interesting failure
//! modes: a missing binary, a failing set-default, a tool that reports
//! success without changing anything, and a change landing on the wrong
//! device.

#![allow(clippy::unwrap_used, dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use resona::services::audio::{CommandError, CommandRunner, RawOutput};

/// One scripted device on the fake server.
pub struct FakeDevice {
    pub name: String,
    pub description: String,
    pub volume_percent: u32,
    pub muted: bool,
}

impl FakeDevice {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_owned(),
            description: description.to_owned(),
            volume_percent: 50,
            muted: false,
        }
    }
}

/// Mutable world the fake tool operates on.
#[derive(Default)]
pub struct FakeState {
    pub sinks: Vec<FakeDevice>,
    pub sources: Vec<FakeDevice>,
    pub default_sink: Option<String>,
    pub default_source: Option<String>,
    /// Every set-default invocation exits non-zero
    pub fail_set_default: bool,
    /// The second and later set-default invocations exit non-zero
    pub fail_set_default_after_first: bool,
    /// set-default exits zero but changes nothing
    pub ignore_set_default: bool,
    /// The next set-default lands on this id instead of the requested one
    pub hijack_next_set: Option<String>,
    /// The info query exits non-zero
    pub fail_info: bool,
    /// Every invocation reports the binary as missing
    pub tool_missing: bool,
    /// Recorded (subcommand, id) pairs for every mutating call
    pub set_calls: Vec<(String, String)>,
}

/// [`CommandRunner`] double that behaves like the control tool.
pub struct FakePactl {
    state: Mutex<FakeState>,
}

impl FakePactl {
    pub fn new(state: FakeState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Sinks named `dev-A` .. with `dev-A` as the default.
    pub fn with_four_sinks() -> Self {
        Self::new(FakeState {
            sinks: vec![
                FakeDevice::new("dev-A", "Built-in Audio"),
                FakeDevice::new("dev-B", "USB Headset"),
                FakeDevice::new("dev-C", "HDMI Output"),
                FakeDevice::new("dev-D", "Bluetooth Speaker"),
            ],
            default_sink: Some("dev-A".to_owned()),
            ..FakeState::default()
        })
    }

    pub fn set_calls(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().set_calls.clone()
    }

    pub fn default_sink(&self) -> Option<String> {
        self.state.lock().unwrap().default_sink.clone()
    }

    pub fn default_source(&self) -> Option<String> {
        self.state.lock().unwrap().default_source.clone()
    }

    pub fn mutate(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }
}

fn render_device_list(kind: &str, devices: &[FakeDevice]) -> String {
    let mut output = String::new();
    for (index, device) in devices.iter().enumerate() {
        let mute = if device.muted { "yes" } else { "no" };
        let raw = device.volume_percent * 65536 / 100;
        output.push_str(&format!(
            "{kind} #{index}\n\
             \tState: RUNNING\n\
             \tName: {name}\n\
             \tDescription: {description}\n\
             \tMute: {mute}\n\
             \tVolume: front-left: {raw} / {percent}% / 0.00 dB,   front-right: {raw} / {percent}% / 0.00 dB\n\
             \t        balance 0.00\n\
             \tProperties:\n\
             \t\tdevice.class = \"sound\"\n\n",
            name = device.name,
            description = device.description,
            percent = device.volume_percent,
        ));
    }
    output
}

fn render_default(id: &Option<String>) -> String {
    match id {
        Some(id) => format!("{id}\n"),
        None => String::new(),
    }
}

#[async_trait]
impl CommandRunner for FakePactl {
    async fn run(&self, program: &str, args: &[&str]) -> Result<RawOutput, CommandError> {
        let mut state = self.state.lock().unwrap();

        if state.tool_missing {
            return Err(CommandError::NotFound {
                program: program.to_owned(),
            });
        }

        match args {
            ["list", "sinks"] => Ok(RawOutput::from_stdout(render_device_list(
                "Sink",
                &state.sinks,
            ))),
            ["list", "sources"] => Ok(RawOutput::from_stdout(render_device_list(
                "Source",
                &state.sources,
            ))),
            ["get-default-sink"] => Ok(RawOutput::from_stdout(render_default(&state.default_sink))),
            ["get-default-source"] => Ok(RawOutput::from_stdout(render_default(
                &state.default_source,
            ))),
            ["info"] => {
                if state.fail_info {
                    Err(CommandError::NonZeroExit {
                        code: 1,
                        stderr: "Connection failure: Connection refused".to_owned(),
                    })
                } else {
                    Ok(RawOutput::from_stdout(
                        "Server String: /run/user/1000/pulse/native\n\
                         Server Name: PulseAudio (on PipeWire 1.0.5)\n\
                         Server Version: 15.0.0\n",
                    ))
                }
            }
            [subcommand @ ("set-default-sink" | "set-default-source"), id] => {
                state
                    .set_calls
                    .push(((*subcommand).to_owned(), (*id).to_owned()));

                let failing = state.fail_set_default
                    || (state.fail_set_default_after_first && state.set_calls.len() > 1);
                if failing {
                    return Err(CommandError::NonZeroExit {
                        code: 1,
                        stderr: "Failure: No such entity".to_owned(),
                    });
                }

                let landed = state
                    .hijack_next_set
                    .take()
                    .unwrap_or_else(|| (*id).to_owned());
                if !state.ignore_set_default {
                    if *subcommand == "set-default-sink" {
                        state.default_sink = Some(landed);
                    } else {
                        state.default_source = Some(landed);
                    }
                }

                Ok(RawOutput::from_stdout(""))
            }
            _ => Err(CommandError::Launch {
                details: format!("fake tool got unexpected arguments: {args:?}"),
            }),
        }
    }
}
