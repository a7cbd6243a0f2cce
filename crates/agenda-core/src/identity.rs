//! Event identity.
//!
//! Two provider records describe the same event when they render the same
//! time range, date and sanitized title, even if the provider gives them
//! different internal identifiers (e.g. the same meeting on two calendars).

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::event::EventRecord;
use crate::sanitize::sanitize_title;

/// `chrono` format for the event date (`yyyy-MM-dd`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `chrono` format for event times (`hh:mm AM`).
pub const TIME_FORMAT: &str = "%I:%M %p";

/// The rendered parts of an event that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventIdentity {
    /// Formatted start time.
    pub start: String,
    /// Formatted end time.
    pub end: String,
    /// Formatted start date.
    pub date: String,
    /// Sanitized title.
    pub title: String,
}

impl EventIdentity {
    /// Derives the identity of an event with the default formats.
    pub fn from_event(event: &EventRecord) -> Self {
        Self::with_formats(event, DATE_FORMAT, TIME_FORMAT)
    }

    /// Derives the identity of an event with explicit date and time formats.
    pub fn with_formats(event: &EventRecord, date_format: &str, time_format: &str) -> Self {
        Self {
            start: format_time(&event.start, time_format),
            end: format_time(&event.end, time_format),
            date: format_time(&event.start, date_format),
            title: sanitize_title(&event.title),
        }
    }

    /// Returns the note name, `"{date} - {title}"`.
    pub fn name(&self) -> String {
        format!("{} - {}", self.date, self.title)
    }

    /// Returns the identity key used for de-duplication.
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EventIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{} - {}` {} - {}", self.start, self.end, self.date, self.title)
    }
}

/// Returns the identity key of an event with the default formats.
pub fn identity_key(event: &EventRecord) -> String {
    EventIdentity::from_event(event).key()
}

fn format_time(dt: &DateTime<FixedOffset>, format: &str) -> String {
    dt.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, min: u32) -> DateTime<FixedOffset> {
        FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, h, min, 0)
            .unwrap()
    }

    #[test]
    fn key_shape() {
        let event = EventRecord::new("FW: 1:1 Carl<>Frank", at(9, 0), at(9, 30)).unwrap();
        assert_eq!(
            identity_key(&event),
            "`09:00 AM - 09:30 AM` 2024-01-01 - 11 CarlFrank"
        );
    }

    #[test]
    fn afternoon_uses_twelve_hour_clock() {
        let event = EventRecord::new("Review", at(13, 5), at(14, 0)).unwrap();
        let identity = EventIdentity::from_event(&event);
        assert_eq!(identity.start, "01:05 PM");
        assert_eq!(identity.end, "02:00 PM");
        assert_eq!(identity.name(), "2024-01-01 - Review");
    }

    #[test]
    fn uses_event_offset_not_utc() {
        // 23:30 at UTC-5 is already the next day in UTC.
        let event = EventRecord::new("Late", at(23, 30), at(23, 45)).unwrap();
        let identity = EventIdentity::from_event(&event);
        assert_eq!(identity.date, "2024-01-01");
        assert_eq!(identity.start, "11:30 PM");
    }

    #[test]
    fn titles_that_sanitize_alike_share_a_key() {
        let a = EventRecord::new("FW: Sync", at(9, 0), at(9, 30)).unwrap();
        let b = EventRecord::new("Sync", at(9, 0), at(9, 30)).unwrap();
        assert_eq!(identity_key(&a), identity_key(&b));
    }

    #[test]
    fn different_times_differ() {
        let a = EventRecord::new("Sync", at(9, 0), at(9, 30)).unwrap();
        let b = EventRecord::new("Sync", at(9, 0), at(10, 0)).unwrap();
        assert_ne!(identity_key(&a), identity_key(&b));
    }

    #[test]
    fn custom_formats() {
        let event = EventRecord::new("Sync", at(14, 0), at(15, 0)).unwrap();
        let identity = EventIdentity::with_formats(&event, "%d/%m", "%H:%M");
        assert_eq!(identity.key(), "`14:00 - 15:00` 01/01 - Sync");
    }
}
