//! ICS/iCalendar parsing utilities.
//!
//! This module parses iCalendar (RFC 5545) data and converts it to [`RawEvent`].

use icalendar::{
    Calendar, CalendarComponent, CalendarDateTime, Component, DatePerhapsTime, Event, EventLike,
};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::{RawEvent, RawEventTime};

/// Parses ICS content and extracts its events.
///
/// Every event is tagged with the calendar's `NAME` (or `X-WR-CALNAME`), or
/// with `fallback_name` when the calendar has none. Recurring events are returned
/// once, as their base instance.
///
/// # Errors
///
/// Returns a `Parse` error if the content is not a valid calendar.
pub fn parse_calendar(ics: &str, fallback_name: &str) -> ProviderResult<Vec<RawEvent>> {
    let calendar = ics
        .parse::<Calendar>()
        .map_err(|e| ProviderError::parse(format!("invalid calendar data: {}", e)))?;

    let name = calendar
        .get_name()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| fallback_name.to_string(), str::to_string);

    Ok(calendar
        .iter()
        .filter_map(|component| match component {
            CalendarComponent::Event(event) => Some(parse_event(event, &name)),
            _ => None,
        })
        .enumerate()
        .map(|(index, mut event)| {
            if event.id.is_empty() {
                event.id = format!("{}#{}", name, index);
            }
            event
        })
        .collect())
}

/// Parses a single VEVENT component into a RawEvent.
///
/// Missing fields stay missing; normalization decides whether the event is
/// usable.
fn parse_event(event: &Event, calendar: &str) -> RawEvent {
    let mut raw = RawEvent::new(event.get_uid().unwrap_or_default()).with_calendar(calendar);

    raw.summary = event.get_summary().map(str::to_string);
    raw.start = event.get_start().map(convert_date_time);
    raw.end = event.get_end().map(convert_date_time);

    if let Some(status) = event.get_status() {
        raw = raw.with_status(format!("{:?}", status));
    }

    if event.property_value("RRULE").is_some() {
        raw = raw.with_recurrence(true);
    }

    debug!(
        uid = %raw.id,
        summary = ?raw.summary,
        start = ?raw.start,
        "Parsed event from ICS"
    );

    raw
}

/// Converts icalendar DatePerhapsTime to RawEventTime.
///
/// Times carrying a TZID are read as local wall-clock times.
fn convert_date_time(dt: DatePerhapsTime) -> RawEventTime {
    match dt {
        DatePerhapsTime::Date(date) => RawEventTime::from_date(date),
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => RawEventTime::from_utc(dt),
        DatePerhapsTime::DateTime(CalendarDateTime::Floating(naive)) => {
            RawEventTime::from_local(naive)
        }
        DatePerhapsTime::DateTime(CalendarDateTime::WithTimezone { date_time, tzid }) => {
            debug!(tzid = %tzid, "Reading zoned time as local time");
            RawEventTime::from_local(date_time)
        }
    }
}
