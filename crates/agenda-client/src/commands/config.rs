//! Configuration commands.

use std::io::Write;
use std::path::Path;

use crate::config::{AgendaConfig, RunConfig};
use crate::error::{AgendaError, AgendaResult};

/// Writes the merged configuration as TOML.
pub fn dump<W: Write>(config: &RunConfig, out: &mut W) -> AgendaResult<()> {
    let toml_str = toml::to_string_pretty(&config.to_file_config())
        .map_err(|e| AgendaError::Config(format!("failed to serialize config: {}", e)))?;
    writeln!(out, "# merged from defaults, config file, environment and flags")?;
    write!(out, "{}", toml_str)?;
    Ok(())
}

/// Writes the configuration file path in use.
pub fn path<W: Write>(explicit: Option<&Path>, out: &mut W) -> AgendaResult<()> {
    let path = explicit.map_or_else(AgendaConfig::default_path, Path::to_path_buf);
    writeln!(out, "config: {}", path.display())?;
    Ok(())
}
