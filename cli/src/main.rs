//! CLI entrypoint for LEAP Studio
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod community;
mod config_cmd;
mod extract;
mod features;
mod input;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use leap_application::GenerateError;
use leap_infrastructure::{ConfigLoader, FileConfig, FileLoggingConfig};
use leap_presentation::{Cli, Command, ConsoleFormatter, OutputConfig};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        let retryable = e
            .downcast_ref::<GenerateError>()
            .is_some_and(GenerateError::is_retryable);
        debug!("{e:?}");
        eprint!("{}", ConsoleFormatter::format_error(&format!("{e:#}"), retryable));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let _guard = init_logging(cli.verbose, &config.logging);

    info!("Starting LEAP Studio");

    let output = OutputConfig::from_file(
        config.output.format,
        config.output.color,
        config.output.show_progress,
    )
    .with_cli_overrides(cli.output.map(Into::into), cli.no_color, cli.quiet);
    output.apply();

    match cli.command {
        Command::Config(command) => config_cmd::run(command, &config, cli.config.as_ref()),
        Command::Community(command) => {
            community::run(command, config.store.resolve_path(), &output)
        }
        Command::Extract(args) => extract::run(&args, config.extraction.bracket_scan, &output),
        command => {
            // === Dependency Injection ===
            let runner = features::FeatureRunner::new(config, output)?;
            runner.dispatch(command).await
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Invalid configuration: {e}"))?
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Console logging on stderr by verbosity, plus an optional daily log file.
///
/// `RUST_LOG` takes precedence over `-v` when set.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match &logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "leap.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}
