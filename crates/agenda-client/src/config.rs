//! Client configuration.
//!
//! Settings are merged from four layers, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. `config.toml`, at `~/.config/agenda/config.toml` by default
//! 3. the `WIKI_LINK` / `GANTT_CHART` environment switches
//! 4. command-line flags
//!
//! The result is a [`RunConfig`], built once and read-only afterwards.

use std::path::{Path, PathBuf};

use agenda_core::settings::is_enabled;
use agenda_core::{GANTT_CHART_ENV, Settings, WIKI_LINK_ENV};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{AgendaError, AgendaResult};

// ---------------------------------------------------------------------------
// AgendaConfig (config.toml)
// ---------------------------------------------------------------------------

/// Contents of the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgendaConfig {
    /// Output settings.
    pub output: OutputSettings,

    /// Calendar source settings.
    pub sources: SourceSettings,
}

/// Output settings for agenda rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Wrap event names in wiki-links.
    pub wiki_links: bool,

    /// Render the Gantt chart before the list.
    pub timeline: bool,

    /// Print the day as a heading before the agenda.
    pub date_heading: bool,
}

/// Where calendar events are read from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Calendar files or directories of `.ics` files. A leading `~/` is
    /// expanded to the home directory.
    pub paths: Vec<PathBuf>,

    /// Only include events from these calendars. Empty means all.
    pub calendars: Vec<String>,
}

impl AgendaConfig {
    /// Loads configuration from the default path.
    ///
    /// A missing default file yields the defaults.
    pub fn load() -> AgendaResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path. The file must exist.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AgendaError::config_file(path, format!("failed to read config: {}", e)))?;
        let config = toml::from_str(&content)
            .map_err(|e| AgendaError::config_file(path, format!("failed to parse config: {}", e)))?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("agenda")
    }
}

// ---------------------------------------------------------------------------
// RunConfig (merged)
// ---------------------------------------------------------------------------

/// Everything one agenda run needs, after merging all layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Formatter settings.
    pub settings: Settings,

    /// Print `# yyyy-MM-dd` before the agenda.
    pub date_heading: bool,

    /// Calendar files and directories, with `~` expanded.
    pub sources: Vec<PathBuf>,

    /// Calendar filter; `None` means all calendars.
    pub calendars: Option<Vec<String>>,

    /// Day to render; `None` means today.
    pub date: Option<NaiveDate>,
}

impl RunConfig {
    /// Merges the file, environment and command-line layers.
    ///
    /// An environment switch that is set overrides the file, whatever its
    /// value; an unset one leaves the file value alone. Flags only ever
    /// enable.
    pub fn resolve<F>(file: AgendaConfig, env: F, cli: &Cli) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let switch = |key: &str, file_value: bool| match env(key) {
            Some(value) => is_enabled(&value),
            None => file_value,
        };

        let settings = Settings::new()
            .with_wiki_links(cli.wiki_link || switch(WIKI_LINK_ENV, file.output.wiki_links))
            .with_timeline(cli.gantt_chart || switch(GANTT_CHART_ENV, file.output.timeline));

        let sources = file
            .sources
            .paths
            .iter()
            .chain(cli.source.iter())
            .map(|path| expand_home(path))
            .collect();

        let calendars: Vec<String> = file
            .sources
            .calendars
            .into_iter()
            .chain(cli.calendar.iter().cloned())
            .collect();

        Self {
            settings,
            date_heading: cli.heading || file.output.date_heading,
            sources,
            calendars: (!calendars.is_empty()).then_some(calendars),
            date: cli.date,
        }
    }

    /// Converts back to the file representation, for display.
    pub fn to_file_config(&self) -> AgendaConfig {
        AgendaConfig {
            output: OutputSettings {
                wiki_links: self.settings.use_wiki_links,
                timeline: self.settings.include_timeline,
                date_heading: self.date_heading,
            },
            sources: SourceSettings {
                paths: self.sources.clone(),
                calendars: self.calendars.clone().unwrap_or_default(),
            },
        }
    }
}

/// Expands a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}
