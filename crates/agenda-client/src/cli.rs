//! Command-line interface definition.

use std::path::PathBuf;

use agenda_core::TracingOutputFormat;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// agenda - Today's calendar events as markdown
#[derive(Debug, Parser)]
#[command(name = "agenda")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "AGENDA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    /// Log format on stderr: pretty, compact or json
    #[arg(long, env = "AGENDA_LOG_FORMAT", default_value = "compact")]
    pub log_format: TracingOutputFormat,

    // --- Output flags ---
    /// Wrap event names in [[wiki-links]]
    #[arg(long)]
    pub wiki_link: bool,

    /// Render a mermaid Gantt chart before the list
    #[arg(long)]
    pub gantt_chart: bool,

    /// Print the day as a heading before the agenda
    #[arg(long)]
    pub heading: bool,

    // --- Source flags ---
    /// Calendar file or directory of .ics files (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub source: Vec<PathBuf>,

    /// Only include events from this calendar (can be repeated)
    #[arg(long, action = clap::ArgAction::Append)]
    pub calendar: Vec<String>,

    /// Day to render (YYYY-MM-DD), today by default
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump the merged configuration
    Dump,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "agenda",
            "--wiki-link",
            "--gantt-chart",
            "--source",
            "/tmp/work.ics",
            "--source",
            "/tmp/home",
            "--calendar",
            "Work",
            "--date",
            "2024-01-01",
        ])
        .unwrap();

        assert!(cli.wiki_link);
        assert!(cli.gantt_chart);
        assert!(!cli.heading);
        assert_eq!(cli.source.len(), 2);
        assert_eq!(cli.calendar, vec!["Work".to_string()]);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert!(cli.command.is_none());
    }

    #[test]
    fn log_format() {
        let cli = Cli::try_parse_from(["agenda"]).unwrap();
        assert_eq!(cli.log_format, TracingOutputFormat::Compact);

        let cli = Cli::try_parse_from(["agenda", "--log-format", "json"]).unwrap();
        assert_eq!(cli.log_format, TracingOutputFormat::Json);

        assert!(Cli::try_parse_from(["agenda", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(Cli::try_parse_from(["agenda", "--date", "01/01/2024"]).is_err());
    }

    #[test]
    fn config_subcommand() {
        let cli = Cli::try_parse_from(["agenda", "config", "path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
    }
}
