//! Output formatting for a day's agenda.
//!
//! Two formatters share one template (`header`, one line per event,
//! `footer`):
//! - **List**: a markdown bullet list, one line per event
//! - **Timeline**: a mermaid Gantt block, one bar per timed event
//!
//! # Example
//!
//! ```rust
//! use agenda_core::format::{render_agenda, NO_EVENTS_MESSAGE};
//! use agenda_core::Settings;
//!
//! let output = render_agenda(&[], &Settings::default());
//! assert_eq!(output, NO_EVENTS_MESSAGE);
//! ```

use serde::{Deserialize, Serialize};

use crate::event::EventRecord;
use crate::identity::EventIdentity;
use crate::settings::Settings;

/// Output when there is nothing to render.
pub const NO_EVENTS_MESSAGE: &str = "No events today";

const TIMELINE_HEADER: &str = "```mermaid\n\
gantt\n\
dateFormat hh:mm A\n\
axisFormat %I:%M%p\n\
title Today's Agenda\n\
\n";

const TIMELINE_FOOTER: &str = "```\n";

/// The available agenda formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatter {
    /// Markdown bullet list.
    List,
    /// Mermaid Gantt chart.
    Timeline,
}

impl Formatter {
    /// Returns the formatters enabled by `settings`, in output order.
    pub fn enabled(settings: &Settings) -> Vec<Self> {
        let mut formatters = Vec::with_capacity(2);
        if settings.include_timeline {
            formatters.push(Self::Timeline);
        }
        formatters.push(Self::List);
        formatters
    }

    /// Renders `events` as one text block.
    ///
    /// Canceled events are skipped even though [`crate::dedupe::dedupe`] already
    /// removes them.
    pub fn build(&self, events: &[EventRecord], settings: &Settings) -> String {
        let mut output = vec![self.header().to_string()];

        for event in events {
            if event.is_canceled() {
                continue;
            }
            output.push(self.render_one(event, settings));
        }

        output.push(self.footer().to_string());
        output.concat()
    }

    fn header(&self) -> &'static str {
        match self {
            Self::List => "",
            Self::Timeline => TIMELINE_HEADER,
        }
    }

    fn footer(&self) -> &'static str {
        match self {
            Self::List => "",
            Self::Timeline => TIMELINE_FOOTER,
        }
    }

    fn render_one(&self, event: &EventRecord, settings: &Settings) -> String {
        let identity = EventIdentity::from_event(event);
        match self {
            Self::List => {
                let name = if settings.use_wiki_links {
                    wiki_link(&identity.name())
                } else {
                    identity.name()
                };
                format!("- `{} - {}` {}\n", identity.start, identity.end, name)
            }
            Self::Timeline if event.is_all_day => String::new(),
            // The task id slot between the colon and the start time stays
            // empty until events carry a stable id.
            Self::Timeline => format!("{} : {},{}\n", identity.title, identity.start, identity.end),
        }
    }
}

/// Renders the agenda for already de-duplicated `events`.
///
/// Returns exactly [`NO_EVENTS_MESSAGE`] for an empty slice. Otherwise the
/// timeline block (when enabled) comes first, separated from the list block
/// by a blank line.
pub fn render_agenda(events: &[EventRecord], settings: &Settings) -> String {
    if events.is_empty() {
        return NO_EVENTS_MESSAGE.to_string();
    }

    Formatter::enabled(settings)
        .iter()
        .map(|formatter| formatter.build(events, settings))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wraps a note name as a wiki-link.
pub fn wiki_link(name: &str) -> String {
    format!("[[{}]]", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventStatus;
    use chrono::{DateTime, FixedOffset, TimeZone};

    fn at(h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, h, min, 0)
            .unwrap()
    }

    fn event(title: &str, start: (u32, u32), end: (u32, u32)) -> EventRecord {
        EventRecord::new(title, at(start.0, start.1), at(end.0, end.1)).unwrap()
    }

    fn all_day(title: &str) -> EventRecord {
        EventRecord::new(title, at(0, 0), at(23, 59))
            .unwrap()
            .with_all_day(true)
    }

    mod formatter_selection {
        use super::*;

        #[test]
        fn list_only_by_default() {
            assert_eq!(Formatter::enabled(&Settings::default()), vec![Formatter::List]);
        }

        #[test]
        fn timeline_before_list() {
            let settings = Settings::new().with_timeline(true);
            assert_eq!(
                Formatter::enabled(&settings),
                vec![Formatter::Timeline, Formatter::List]
            );
        }
    }

    mod list {
        use super::*;

        #[test]
        fn plain_line() {
            let events = vec![event("FW: 1:1 Carl<>Frank", (9, 0), (9, 30))];
            let output = Formatter::List.build(&events, &Settings::default());
            assert_eq!(output, "- `09:00 AM - 09:30 AM` 2024-01-01 - 11 CarlFrank\n");
        }

        #[test]
        fn wiki_link_line() {
            let events = vec![event("FW: 1:1 Carl<>Frank", (9, 0), (9, 30))];
            let settings = Settings::new().with_wiki_links(true);
            let output = Formatter::List.build(&events, &settings);
            assert_eq!(
                output,
                "- `09:00 AM - 09:30 AM` [[2024-01-01 - 11 CarlFrank]]\n"
            );
        }

        #[test]
        fn all_day_events_listed() {
            let output = Formatter::List.build(&[all_day("Holiday")], &Settings::default());
            assert_eq!(output, "- `12:00 AM - 11:59 PM` 2024-01-01 - Holiday\n");
        }

        #[test]
        fn empty_list_has_no_header() {
            assert_eq!(Formatter::List.build(&[], &Settings::default()), "");
        }

        #[test]
        fn skips_canceled() {
            let events = vec![
                event("Gone", (9, 0), (9, 30)).with_status(EventStatus::Canceled),
                event("Here", (10, 0), (10, 30)),
            ];
            let output = Formatter::List.build(&events, &Settings::default());
            assert!(!output.contains("Gone"));
            assert!(output.contains("Here"));
        }
    }

    mod timeline {
        use super::*;

        #[test]
        fn header_and_footer() {
            let output = Formatter::Timeline.build(&[], &Settings::default());
            assert!(output.starts_with("```mermaid\ngantt\n"));
            assert!(output.contains("dateFormat hh:mm A\n"));
            assert!(output.contains("axisFormat %I:%M%p\n"));
            assert!(output.contains("title Today's Agenda\n\n"));
            assert!(output.ends_with("```\n"));
        }

        #[test]
        fn bar_line() {
            let events = vec![event("R&D Sync", (13, 0), (14, 30))];
            let output = Formatter::Timeline.build(&events, &Settings::default());
            assert!(output.contains("\nRandD Sync : 01:00 PM,02:30 PM\n"));
        }

        #[test]
        fn all_day_events_skipped() {
            let output = Formatter::Timeline.build(&[all_day("Holiday")], &Settings::default());
            assert_eq!(output, format!("{}{}", TIMELINE_HEADER, TIMELINE_FOOTER));
        }

        #[test]
        fn ignores_wiki_links() {
            let events = vec![event("Sync", (9, 0), (9, 30))];
            let settings = Settings::new().with_wiki_links(true);
            let output = Formatter::Timeline.build(&events, &settings);
            assert!(!output.contains("[["));
        }
    }

    mod agenda {
        use super::*;

        #[test]
        fn empty_is_exact_message() {
            let settings = Settings::new().with_timeline(true).with_wiki_links(true);
            assert_eq!(render_agenda(&[], &settings), "No events today");
        }

        #[test]
        fn list_only() {
            let events = vec![event("Sync", (9, 0), (9, 30))];
            let output = render_agenda(&events, &Settings::default());
            assert_eq!(output, "- `09:00 AM - 09:30 AM` 2024-01-01 - Sync\n");
        }

        #[test]
        fn timeline_then_list() {
            let events = vec![event("Sync", (9, 0), (9, 30))];
            let settings = Settings::new().with_timeline(true);
            let output = render_agenda(&events, &settings);

            let timeline_at = output.find("```mermaid").unwrap();
            let list_at = output.find("- `09:00 AM").unwrap();
            assert!(timeline_at < list_at);
            assert!(output.contains("```\n\n- `"));
        }

        #[test]
        fn canceled_never_rendered() {
            let events = vec![event("Dropped", (9, 0), (9, 30)).with_status(EventStatus::Canceled)];
            let settings = Settings::new().with_timeline(true).with_wiki_links(true);
            let output = render_agenda(&events, &settings);
            assert!(!output.contains("Dropped"));
        }
    }

    #[test]
    fn wiki_link_wraps() {
        assert_eq!(wiki_link("2024-01-01 - Sync"), "[[2024-01-01 - Sync]]");
    }
}
