//! Resona entry point.
//!
//! Routes command-line arguments through the CLI service. The shell owns
//! argument parsing, output printing and exit-code mapping; everything
//! that touches device state lives in the service layer.

use std::{env, error::Error, process, sync::Arc};

use resona::{
    cli::{CliService, formatting::format_error},
    config::Config,
    services::audio::AudioConfigService,
    tracing_config,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_config::init_cli_mode()?;

    let args: Vec<String> = env::args().collect();
    run_cli_command(&args[1..]).await
}

/// Executes CLI commands through the CliService.
///
/// Routes `resona <category> <command> [args...]` to the matching command
/// handler; no category, `help` or `--help` prints the command list.
///
/// # Errors
/// Returns error if configuration loading or tracing setup fails; command
/// failures print to stderr and exit with code 1 instead.
async fn run_cli_command(args: &[String]) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let audio_service = Arc::new(AudioConfigService::new(&config.audio));
    let cli_service = CliService::new(audio_service);

    let category = args.first().map(String::as_str).unwrap_or("help");
    if matches!(category, "help" | "--help" | "-h") {
        println!("{}", cli_service.render_help());
        return Ok(());
    }

    let command = args.get(1).map(String::as_str).unwrap_or("");
    let command_args = args.get(2..).unwrap_or(&[]);

    let result = cli_service
        .execute_command(category, command, command_args)
        .await;

    match result {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
