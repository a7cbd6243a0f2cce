//! Event types for calendar events.
//!
//! This module provides the core types for representing calendar events:
//! - [`EventRecord`]: A validated, provider-agnostic event representation
//! - [`EventStatus`]: The participation status of an event

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// The status of a calendar event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// The event is confirmed (also used when the provider reports no status).
    #[default]
    Confirmed,
    /// The event is tentative.
    Tentative,
    /// The event was canceled. Canceled events never reach rendered output.
    Canceled,
}

impl EventStatus {
    /// Parses a provider status string.
    ///
    /// Accepts both spellings of "canceled"; unknown values map to
    /// [`EventStatus::Confirmed`].
    pub fn from_provider(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tentative" => Self::Tentative,
            "canceled" | "cancelled" => Self::Canceled,
            _ => Self::Confirmed,
        }
    }
}

/// A normalized calendar event.
///
/// Times carry the local UTC offset that was in effect when the provider
/// record was validated, so formatting never consults the process time zone.
/// `start <= end` holds for every record built through [`EventRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// The raw event title, as supplied by the provider.
    pub title: String,
    /// When the event starts, in local time.
    pub start: DateTime<FixedOffset>,
    /// When the event ends, in local time.
    pub end: DateTime<FixedOffset>,
    /// Whether this is an all-day event.
    pub is_all_day: bool,
    /// The event status.
    pub status: EventStatus,
    /// The calendar this event belongs to, if the provider reports one.
    pub calendar: Option<String>,
}

impl EventRecord {
    /// Creates a new confirmed, timed event.
    ///
    /// Returns `None` when `end` is before `start`.
    pub fn new(
        title: impl Into<String>,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Option<Self> {
        if end < start {
            return None;
        }
        Some(Self {
            title: title.into(),
            start,
            end,
            is_all_day: false,
            status: EventStatus::Confirmed,
            calendar: None,
        })
    }

    /// Returns true if the event was canceled.
    pub fn is_canceled(&self) -> bool {
        self.status == EventStatus::Canceled
    }

    /// Builder method to set the status.
    pub fn with_status(mut self, status: EventStatus) -> Self {
        self.status = status;
        self
    }

    /// Builder method to mark the event as all-day.
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    /// Builder method to set the calendar name.
    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }
}
