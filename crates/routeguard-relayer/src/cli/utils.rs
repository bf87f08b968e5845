use super::commands::{Cli, OutputFormat};
use routeguard_relayer::config::LoggingConfig;
use routeguard_types::{RouteGuardError, RouteGuardResult};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const BUILD_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn init_logging(cli: &Cli, logging: &LoggingConfig) -> RouteGuardResult<()> {
    let level = if cli.quiet {
        "warn".to_string()
    } else {
        match cli.verbose {
            0 => logging.level.to_string(),
            1 => "info,routeguard_relayer=debug,routeguard=debug".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (text_layer, json_layer) = if logging.json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer().with_target(cli.verbose >= 2)), None)
    };

    let file_layer = match cli.log_file.as_ref().or(logging.file.as_ref()) {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    RouteGuardError::Config(format!("Failed to open log file {:?}: {}", path, e))
                })?;
            Some(
                fmt::layer()
                    .with_writer(std::sync::Mutex::new(file))
                    .with_ansi(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RouteGuardError::Internal(format!("Failed to initialize logging: {}", e)))
}

pub fn print_banner() {
    println!("\x1b[38;5;46m");
    println!(
        r#"
    ┬─┐┌─┐┬ ┬┌┬┐┌─┐┌─┐┬ ┬┌─┐┬─┐┌┬┐
    ├┬┘│ ││ │ │ ├┤ │ ┬│ │├─┤├┬┘ ││
    ┴└─└─┘└─┘ ┴ └─┘└─┘└─┘┴ ┴┴└──┴┘"#
    );
    println!("\x1b[0m");
    println!("        \x1b[38;5;245mAnonymous Incident Relayer - v{}\x1b[0m", BUILD_VERSION);
    println!();
}

/// Prints `value` as pretty JSON, or hands it to `text` for human output.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    value: &T,
    text: impl FnOnce(&T),
) -> RouteGuardResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| RouteGuardError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Text => text(value),
    }
    Ok(())
}
