//! ICS provider configuration.

use std::path::{Path, PathBuf};

/// File extension of iCalendar files picked up from source directories.
pub const ICS_EXTENSION: &str = "ics";

/// Configuration for the ICS provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcsConfig {
    /// Files or directories to read calendars from.
    pub sources: Vec<PathBuf>,
}

impl IcsConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a calendar file or directory.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Adds several calendar files or directories.
    pub fn with_sources<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Returns true if no source is configured.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Returns true if `path` names an iCalendar file.
pub(crate) fn is_ics_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ICS_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = IcsConfig::new()
            .with_source("/tmp/work.ics")
            .with_sources(["/tmp/a", "/tmp/b"]);
        assert_eq!(config.sources.len(), 3);
        assert!(!config.is_empty());
        assert!(IcsConfig::new().is_empty());
    }

    #[test]
    fn ics_extension() {
        assert!(is_ics_file(Path::new("work.ics")));
        assert!(is_ics_file(Path::new("WORK.ICS")));
        assert!(!is_ics_file(Path::new("notes.txt")));
        assert!(!is_ics_file(Path::new("ics")));
    }
}
