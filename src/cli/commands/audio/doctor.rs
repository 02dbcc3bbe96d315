use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, Command, CommandResult,
        formatting::{format_error, format_header, format_success},
        types::{CommandArg, CommandMetadata},
    },
    services::audio::{
        AudioConfigService, DeviceRole, DeviceSection, DiagnosticsReport, SectionOutcome,
        ServerHealth,
    },
};

/// Command to run audio diagnostics and print a report.
///
/// Sub-check failures are reported inline; the report is produced even
/// when the audio server is completely unreachable.
pub struct DoctorCommand {
    audio_service: Arc<AudioConfigService>,
}

impl DoctorCommand {
    /// Creates a new DoctorCommand.
    pub fn new(audio_service: Arc<AudioConfigService>) -> Self {
        Self { audio_service }
    }
}

#[async_trait]
impl Command for DoctorCommand {
    /// Generates the diagnostics report, as text or as JSON.
    ///
    /// # Errors
    /// Returns [`CliError`] only when the requested output format is
    /// unknown or the report cannot be serialized.
    async fn execute(&self, args: &[String]) -> CommandResult {
        let report = self.audio_service.diagnostics_report().await;

        match args.first().map(String::as_str) {
            Some("json") => serde_json::to_string_pretty(&report).map_err(|e| {
                CliError::ServiceError {
                    service: "audio".to_string(),
                    details: format!("could not serialize report: {e}"),
                }
            }),
            Some(_) => Err(CliError::InvalidArgument {
                arg: "format".to_string(),
                reason: "must be 'json' or omitted".to_string(),
            }),
            None => Ok(render_text(&report)),
        }
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "doctor".to_string(),
            description: "Run audio diagnostics and print a report".to_string(),
            category: "audio".to_string(),
            args: vec![CommandArg {
                name: "format".to_string(),
                description: "Output format, 'json' for machine checking".to_string(),
                required: false,
            }],
            examples: vec![
                "resona audio doctor".to_string(),
                "resona audio doctor json".to_string(),
            ],
        }
    }
}

fn render_text(report: &DiagnosticsReport) -> String {
    let mut output = format!(
        "{} ({})\n\n",
        format_header("Audio diagnostics"),
        report.generated_at
    );

    output.push_str(&format!("Server:   {}\n", render_server(&report.server)));
    output.push_str(&format!(
        "Sinks:    {}\n",
        render_devices(&report.sinks)
    ));
    output.push_str(&format!(
        "Sources:  {}\n",
        render_devices(&report.sources)
    ));
    output.push_str(&format!(
        "Defaults: {}\n",
        match &report.defaults {
            SectionOutcome::Ok(config) => format!(
                "sink {}, source {}",
                config.default_for(DeviceRole::Sink).unwrap_or("(none)"),
                config.default_for(DeviceRole::Source).unwrap_or("(none)"),
            ),
            SectionOutcome::Failed(details) => format_error(details),
        }
    ));

    let verdict = if report.healthy() {
        format_success("healthy")
    } else {
        format_error("degraded")
    };
    output.push_str(&format!("\nOverall:  {verdict}\n"));

    output
}

fn render_server(section: &SectionOutcome<ServerHealth>) -> String {
    match section {
        SectionOutcome::Ok(health) => {
            let identity = match (health.name.is_empty(), health.version.is_empty()) {
                (false, false) => format!("{} {}", health.name, health.version),
                (false, true) => health.name.clone(),
                _ => "reachable".to_string(),
            };
            format_success(&identity)
        }
        SectionOutcome::Failed(details) => format_error(details),
    }
}

fn render_devices(section: &SectionOutcome<DeviceSection>) -> String {
    match section {
        SectionOutcome::Ok(devices) => format!("{} found", devices.count),
        SectionOutcome::Failed(details) => format_error(details),
    }
}
