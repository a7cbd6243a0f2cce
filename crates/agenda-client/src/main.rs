//! agenda CLI entry point.

use std::process::ExitCode;

use agenda_core::{TracingConfig, init_tracing};
use chrono::Local;
use clap::Parser;
use tracing::debug;

use agenda_client::cli::{Cli, Command, ConfigAction};
use agenda_client::commands;
use agenda_client::config::{AgendaConfig, RunConfig};
use agenda_client::error::AgendaResult;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the agenda.
    let tracing = if cli.debug {
        TracingConfig::cli_debug().with_env_filter("agenda=debug")
    } else {
        TracingConfig::default()
    };
    if let Err(e) = init_tracing(tracing.with_format(cli.log_format)) {
        eprintln!("warning: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !e.is_user_message() {
                eprintln!("error: {}", e);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AgendaResult<()> {
    let mut stdout = std::io::stdout().lock();

    // Reporting the path must work even when the file does not parse.
    if let Some(Command::Config {
        action: ConfigAction::Path,
    }) = cli.command
    {
        return commands::config::path(cli.config.as_deref(), &mut stdout);
    }

    let file = match cli.config {
        Some(ref path) => AgendaConfig::load_from(path)?,
        None => AgendaConfig::load()?,
    };
    let config = RunConfig::resolve(file, |key| std::env::var(key).ok(), &cli);
    debug!(config = ?config, "Resolved configuration");

    match cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Dump => commands::config::dump(&config, &mut stdout),
            ConfigAction::Path => commands::config::path(cli.config.as_deref(), &mut stdout),
        },
        None => {
            let day = config.date.unwrap_or_else(|| Local::now().date_naive());
            agenda(&config, day, &mut stdout).await
        }
    }
}

#[cfg(feature = "ics")]
async fn agenda<W: std::io::Write>(
    config: &RunConfig,
    day: chrono::NaiveDate,
    out: &mut W,
) -> AgendaResult<()> {
    use agenda_client::pipeline::Pipeline;
    use agenda_providers::ics::{IcsConfig, IcsProvider};

    let provider = IcsProvider::new(IcsConfig::new().with_sources(config.sources.iter().cloned()));
    Pipeline::from_config(&provider, config).run(day, out).await
}

#[cfg(not(feature = "ics"))]
async fn agenda<W: std::io::Write>(
    _config: &RunConfig,
    _day: chrono::NaiveDate,
    _out: &mut W,
) -> AgendaResult<()> {
    Err(agenda_client::error::AgendaError::Config(
        "built without a calendar provider, enable the `ics` feature".to_string(),
    ))
}
