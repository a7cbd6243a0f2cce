//! iCalendar file provider.
//!
//! This module provides an [`IcsProvider`] that reads events from local
//! `.ics` files, or from directories holding them.
//!
//! # Features
//!
//! - Any mix of files and directories as sources
//! - Authorization derived from source readability
//! - Calendar names from `NAME` or `X-WR-CALNAME`, falling back to the file stem
//! - All-day, UTC, floating and TZID-qualified times
//!
//! # Example
//!
//! ```ignore
//! use agenda_providers::ics::{IcsConfig, IcsProvider};
//!
//! let config = IcsConfig::new().with_source("~/calendars/work.ics");
//! let provider = IcsProvider::new(config);
//! let events = provider.query_events(&window, None).await?;
//! ```

mod config;
mod parse;
mod provider;

pub use config::IcsConfig;
pub use parse::parse_calendar;
pub use provider::IcsProvider;
