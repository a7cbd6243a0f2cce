//! Raw event data from calendar providers.
//!
//! [`RawEvent`] mirrors what a calendar source hands over, before any
//! validation: every field a source may omit is optional here. The
//! [`crate::normalize`] module turns it into a typed [`EventRecord`].
//!
//! [`EventRecord`]: agenda_core::EventRecord

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A raw event time as supplied by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawEventTime {
    /// An absolute instant.
    Utc(DateTime<Utc>),
    /// A wall-clock time in the local zone (floating, or a TZID we do not
    /// resolve).
    Local(NaiveDateTime),
    /// A date without a time (all-day events).
    Date(NaiveDate),
}

impl RawEventTime {
    /// Creates an absolute event time.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self::Utc(dt)
    }

    /// Creates a local wall-clock event time.
    pub fn from_local(dt: NaiveDateTime) -> Self {
        Self::Local(dt)
    }

    /// Creates an all-day event time.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is an all-day time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }
}

/// A raw event from a calendar provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Provider-specific identifier. Not used for de-duplication.
    pub id: String,
    /// The event title (SUMMARY).
    pub summary: Option<String>,
    /// When the event starts.
    pub start: Option<RawEventTime>,
    /// When the event ends (exclusive date for all-day events).
    pub end: Option<RawEventTime>,
    /// The provider status string (e.g. "CONFIRMED", "CANCELLED").
    pub status: Option<String>,
    /// The calendar this event belongs to.
    pub calendar: Option<String>,
    /// Whether the source carries a recurrence rule for this event.
    #[serde(default)]
    pub has_recurrence: bool,
}

impl RawEvent {
    /// Creates a new raw event with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: None,
            start: None,
            end: None,
            status: None,
            calendar: None,
            has_recurrence: false,
        }
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the start and end times.
    pub fn with_times(mut self, start: RawEventTime, end: RawEventTime) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Builder method to set only the start time.
    pub fn with_start(mut self, start: RawEventTime) -> Self {
        self.start = Some(start);
        self
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Builder method to set the calendar.
    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Builder method to flag a recurrence rule.
    pub fn with_recurrence(mut self, has_recurrence: bool) -> Self {
        self.has_recurrence = has_recurrence;
        self
    }
}
