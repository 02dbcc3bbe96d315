//! Unit tests for CLI module
//!
//! Tests command registry lookups, argument count validation, help
//! rendering and formatting. The audio service is backed by a runner that
//! always fails, so no external commands are executed.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cli::{
        CliError, CliService,
        formatting::{Colors, format_error, format_success},
    },
    services::audio::{AudioConfigService, CommandError, CommandRunner, RawOutput},
};

/// Runner that reports the control tool as missing for every invocation.
struct MissingToolRunner;

#[async_trait]
impl CommandRunner for MissingToolRunner {
    async fn run(&self, program: &str, _args: &[&str]) -> Result<RawOutput, CommandError> {
        Err(CommandError::NotFound {
            program: program.to_owned(),
        })
    }
}

fn cli_service() -> CliService {
    let audio = AudioConfigService::with_runner(Arc::new(MissingToolRunner), "pactl");
    CliService::new(Arc::new(audio))
}

#[test]
fn help_lists_all_audio_commands() {
    let help = cli_service().render_help();

    for command in ["devices", "status", "set-default", "doctor"] {
        assert!(help.contains(command), "help is missing '{command}'");
    }
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let result = cli_service().execute_command("video", "devices", &[]).await;

    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn unknown_command_is_not_found() {
    let result = cli_service().execute_command("audio", "mute", &[]).await;

    assert!(matches!(result, Err(CliError::CommandNotFound(_))));
}

#[tokio::test]
async fn excess_arguments_are_rejected() {
    let args = vec!["one".to_string(), "two".to_string()];
    let result = cli_service().execute_command("audio", "status", &args).await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn missing_required_argument_is_rejected() {
    let result = cli_service()
        .execute_command("audio", "set-default", &[])
        .await;

    assert!(matches!(result, Err(CliError::InvalidArguments(_))));
}

#[tokio::test]
async fn service_failure_surfaces_as_service_error() {
    let result = cli_service().execute_command("audio", "status", &[]).await;

    match result {
        Err(CliError::ServiceError { service, details }) => {
            assert_eq!(service, "audio");
            assert!(details.contains("not found"));
        }
        other => panic!("expected ServiceError, got {other:?}"),
    }
}

#[test]
fn error_formatting_wraps_in_red() {
    let formatted = format_error("boom");

    assert!(formatted.contains("boom"));
    assert!(formatted.starts_with(Colors::BOLD));
    assert!(formatted.ends_with(Colors::RESET));
}

#[test]
fn success_formatting_wraps_in_green() {
    let formatted = format_success("done");

    assert!(formatted.contains("done"));
    assert!(formatted.starts_with(Colors::GREEN));
}
