//! Core types: events, sanitizing, de-duplication, agenda formatting

pub mod dedupe;
pub mod event;
pub mod format;
pub mod identity;
pub mod sanitize;
pub mod settings;
pub mod time;
pub mod tracing;

pub use dedupe::dedupe;
pub use event::{EventRecord, EventStatus};
pub use format::{Formatter, NO_EVENTS_MESSAGE, render_agenda, wiki_link};
pub use identity::{DATE_FORMAT, EventIdentity, TIME_FORMAT, identity_key};
pub use sanitize::{TITLE_REPLACEMENTS, sanitize_title};
pub use settings::{GANTT_CHART_ENV, Settings, WIKI_LINK_ENV};
pub use time::{TimeWindow, start_of_day};
pub use crate::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
