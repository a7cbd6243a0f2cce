//! Rendering settings.
//!
//! [`Settings`] is built once per run and handed to every formatter by
//! reference. The environment switches (`WIKI_LINK`, `GANTT_CHART`) are
//! parsed here so that every entry point agrees on what "enabled" means.

use serde::{Deserialize, Serialize};

/// Environment variable enabling wiki-link wrapping of event names.
pub const WIKI_LINK_ENV: &str = "WIKI_LINK";

/// Environment variable enabling the timeline (Gantt) block.
pub const GANTT_CHART_ENV: &str = "GANTT_CHART";

/// Immutable settings shared by all formatters of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Wrap event names as `[[name]]` in the list block.
    pub use_wiki_links: bool,
    /// Render the timeline block before the list block.
    pub include_timeline: bool,
}

impl Settings {
    /// Creates settings with both switches off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads both switches through `lookup`; an unset switch is off.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            use_wiki_links: lookup(WIKI_LINK_ENV).is_some_and(|v| is_enabled(&v)),
            include_timeline: lookup(GANTT_CHART_ENV).is_some_and(|v| is_enabled(&v)),
        }
    }

    /// Builder method to enable wiki-links.
    #[must_use]
    pub fn with_wiki_links(mut self, enabled: bool) -> Self {
        self.use_wiki_links = enabled;
        self
    }

    /// Builder method to enable the timeline block.
    #[must_use]
    pub fn with_timeline(mut self, enabled: bool) -> Self {
        self.include_timeline = enabled;
        self
    }
}

/// Returns true when a switch value is `"true"`, ignoring case and
/// surrounding whitespace. Every other value is off.
pub fn is_enabled(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}
