//! RawEvent to EventRecord validation.
//!
//! This is the provider boundary: every [`RawEvent`] is either turned into a
//! fully typed [`EventRecord`] in the given local zone, or rejected with an
//! `InvalidInput` error. Records are never silently dropped, so two runs over
//! the same data cannot disagree about which events exist.

use agenda_core::{EventRecord, EventStatus, start_of_day};
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use tracing::debug;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::{RawEvent, RawEventTime};

/// Converts a [`RawEvent`] to an [`EventRecord`] in the zone `tz`.
///
/// # Errors
///
/// Returns an `InvalidInput` error when the title or start time is missing,
/// or when the event ends before it starts.
pub fn normalize_event<Tz: TimeZone>(raw: &RawEvent, tz: &Tz) -> ProviderResult<EventRecord> {
    let title = raw
        .summary
        .as_deref()
        .ok_or_else(|| ProviderError::invalid_input(format!("event {} has no title", raw.id)))?;

    let start_raw = raw
        .start
        .ok_or_else(|| ProviderError::invalid_input(format!("event {} has no start time", raw.id)))?;

    let start = convert_start(start_raw, tz);
    let end = match raw.end {
        Some(end_raw) => convert_end(end_raw, start_raw, tz),
        None => default_end(start_raw, start, tz),
    };

    let mut event = EventRecord::new(title, start, end).ok_or_else(|| {
        ProviderError::invalid_input(format!("event {} ends before it starts", raw.id))
    })?;

    event = event
        .with_all_day(start_raw.is_all_day())
        .with_status(
            raw.status
                .as_deref()
                .map(EventStatus::from_provider)
                .unwrap_or_default(),
        );

    if let Some(ref calendar) = raw.calendar {
        event = event.with_calendar(calendar);
    }

    if raw.has_recurrence {
        debug!(id = %raw.id, "Recurrence rule not expanded, using base instance");
    }

    Ok(event)
}

/// Converts a batch of raw events, stopping at the first invalid one.
pub fn normalize_events<Tz: TimeZone>(raw: &[RawEvent], tz: &Tz) -> ProviderResult<Vec<EventRecord>> {
    raw.iter().map(|event| normalize_event(event, tz)).collect()
}

fn convert_start<Tz: TimeZone>(raw: RawEventTime, tz: &Tz) -> DateTime<FixedOffset> {
    match raw {
        RawEventTime::Date(date) => midnight(date, tz),
        other => convert_instant(other, tz),
    }
}

/// All-day end dates are exclusive; the rendered end is the last second of
/// the previous day, and never before the end of the start day.
fn convert_end<Tz: TimeZone>(
    raw: RawEventTime,
    start_raw: RawEventTime,
    tz: &Tz,
) -> DateTime<FixedOffset> {
    match raw {
        RawEventTime::Date(date) => {
            let date = match start_raw {
                RawEventTime::Date(start_date) => date.max(next_day(start_date)),
                _ => date,
            };
            midnight(date, tz) - Duration::seconds(1)
        }
        other => convert_instant(other, tz),
    }
}

fn default_end<Tz: TimeZone>(
    start_raw: RawEventTime,
    start: DateTime<FixedOffset>,
    tz: &Tz,
) -> DateTime<FixedOffset> {
    match start_raw {
        RawEventTime::Date(date) => midnight(next_day(date), tz) - Duration::seconds(1),
        _ => start,
    }
}

fn convert_instant<Tz: TimeZone>(raw: RawEventTime, tz: &Tz) -> DateTime<FixedOffset> {
    match raw {
        RawEventTime::Utc(dt) => dt.with_timezone(tz).fixed_offset(),
        RawEventTime::Local(naive) => tz
            .from_local_datetime(&naive)
            .earliest()
            .unwrap_or_else(|| tz.from_utc_datetime(&naive))
            .fixed_offset(),
        RawEventTime::Date(date) => midnight(date, tz),
    }
}

fn midnight<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<FixedOffset> {
    start_of_day(date, tz).with_timezone(tz).fixed_offset()
}

fn next_day(date: NaiveDate) -> NaiveDate {
    date.succ_opt().unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderErrorCode;
    use chrono::{NaiveDateTime, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn naive(h: u32, min: u32) -> NaiveDateTime {
        date(2024, 1, 1).and_hms_opt(h, min, 0).unwrap()
    }

    fn local(h: u32, min: u32, s: u32) -> DateTime<FixedOffset> {
        tz().with_ymd_and_hms(2024, 1, 1, h, min, s).unwrap()
    }

    #[test]
    fn utc_times_converted_to_zone() {
        let raw = RawEvent::new("evt-1").with_summary("Standup").with_times(
            RawEventTime::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, 14, 0, 0).unwrap()),
            RawEventTime::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, 14, 30, 0).unwrap()),
        );

        let event = normalize_event(&raw, &tz()).unwrap();
        assert_eq!(event.title, "Standup");
        assert_eq!(event.start, local(9, 0, 0));
        assert_eq!(event.start.offset(), &tz());
        assert_eq!(event.end, local(9, 30, 0));
        assert!(!event.is_all_day);
        assert_eq!(event.status, EventStatus::Confirmed);
    }

    #[test]
    fn local_times_kept_as_wall_clock() {
        let raw = RawEvent::new("evt-1")
            .with_summary("Lunch")
            .with_times(RawEventTime::from_local(naive(12, 0)), RawEventTime::from_local(naive(13, 0)));

        let event = normalize_event(&raw, &tz()).unwrap();
        assert_eq!(event.start, local(12, 0, 0));
        assert_eq!(event.end, local(13, 0, 0));
    }

    #[test]
    fn all_day_single_day() {
        let raw = RawEvent::new("evt-1").with_summary("Holiday").with_times(
            RawEventTime::from_date(date(2024, 1, 1)),
            RawEventTime::from_date(date(2024, 1, 2)),
        );

        let event = normalize_event(&raw, &tz()).unwrap();
        assert!(event.is_all_day);
        assert_eq!(event.start, local(0, 0, 0));
        assert_eq!(event.end, local(23, 59, 59));
    }

    #[test]
    fn all_day_without_end() {
        let raw = RawEvent::new("evt-1")
            .with_summary("Holiday")
            .with_start(RawEventTime::from_date(date(2024, 1, 1)));

        let event = normalize_event(&raw, &tz()).unwrap();
        assert_eq!(event.end, local(23, 59, 59));
    }

    #[test]
    fn all_day_end_equal_to_start_covers_the_day() {
        let day = RawEventTime::from_date(date(2024, 1, 1));
        let raw = RawEvent::new("evt-1").with_summary("Holiday").with_times(day, day);

        let event = normalize_event(&raw, &tz()).unwrap();
        assert_eq!(event.end, local(23, 59, 59));
    }

    #[test]
    fn timed_without_end_is_instant() {
        let raw = RawEvent::new("evt-1")
            .with_summary("Reminder")
            .with_start(RawEventTime::from_local(naive(8, 0)));

        let event = normalize_event(&raw, &tz()).unwrap();
        assert_eq!(event.start, event.end);
    }

    #[test]
    fn status_and_calendar_mapped() {
        let raw = RawEvent::new("evt-1")
            .with_summary("Sync")
            .with_times(RawEventTime::from_local(naive(9, 0)), RawEventTime::from_local(naive(9, 30)))
            .with_status("CANCELLED")
            .with_calendar("work");

        let event = normalize_event(&raw, &tz()).unwrap();
        assert!(event.is_canceled());
        assert_eq!(event.calendar.as_deref(), Some("work"));
    }

    #[test]
    fn missing_title_rejected() {
        let raw = RawEvent::new("evt-1")
            .with_times(RawEventTime::from_local(naive(9, 0)), RawEventTime::from_local(naive(9, 30)));

        let err = normalize_event(&raw, &tz()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidInput);
        assert!(err.message().contains("evt-1"));
    }

    #[test]
    fn empty_title_accepted() {
        let raw = RawEvent::new("evt-1")
            .with_summary("")
            .with_start(RawEventTime::from_local(naive(9, 0)));
        assert_eq!(normalize_event(&raw, &tz()).unwrap().title, "");
    }

    #[test]
    fn missing_start_rejected() {
        let raw = RawEvent::new("evt-1").with_summary("Sync");
        let err = normalize_event(&raw, &tz()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidInput);
    }

    #[test]
    fn end_before_start_rejected() {
        let raw = RawEvent::new("evt-1")
            .with_summary("Sync")
            .with_times(RawEventTime::from_local(naive(10, 0)), RawEventTime::from_local(naive(9, 0)));
        let err = normalize_event(&raw, &tz()).unwrap_err();
        assert_eq!(err.code(), ProviderErrorCode::InvalidInput);
    }

    #[test]
    fn batch_fails_fast() {
        let good = RawEvent::new("good")
            .with_summary("Sync")
            .with_start(RawEventTime::from_local(naive(9, 0)));
        let bad = RawEvent::new("bad").with_start(RawEventTime::from_local(naive(10, 0)));

        assert_eq!(normalize_events(&[good.clone()], &tz()).unwrap().len(), 1);
        let err = normalize_events(&[good, bad], &tz()).unwrap_err();
        assert!(err.message().contains("bad"));
    }
}
