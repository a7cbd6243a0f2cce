//! Event collection for one day.

use agenda_core::{EventRecord, TimeWindow};
use agenda_providers::{CalendarProvider, normalize_events};
use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

use crate::error::AgendaResult;

/// Fetches every event of the local day containing `reference`.
///
/// The provider is queried for the closed window from local midnight to the
/// last second of the day. Events come back in provider order, validated and
/// shifted into `tz`.
///
/// # Errors
///
/// Returns `ProviderUnavailable` when the provider cannot be queried and
/// `InvalidInput` when a provider record is missing required fields.
pub async fn collect<Tz: TimeZone>(
    provider: &dyn CalendarProvider,
    reference: DateTime<Utc>,
    tz: &Tz,
    calendars: Option<&[String]>,
) -> AgendaResult<Vec<EventRecord>> {
    let window = TimeWindow::day_containing(reference, tz);
    debug!(
        provider = provider.name(),
        start = %window.start,
        end = %window.end,
        calendars = ?calendars,
        "Querying events"
    );

    let raw = provider.query_events(&window, calendars).await?;
    let events = normalize_events(&raw, tz)?;

    info!(count = events.len(), "Collected events");
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AgendaError;
    use agenda_providers::{MemoryProvider, ProviderErrorCode, RawEvent, RawEventTime};
    use chrono::FixedOffset;

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn at(h: u32, min: u32) -> RawEventTime {
        RawEventTime::from_utc(Utc.with_ymd_and_hms(2024, 1, 1, h, min, 0).unwrap())
    }

    #[tokio::test]
    async fn queries_local_day_window() {
        let provider = MemoryProvider::new(vec![
            RawEvent::new("a")
                .with_summary("Standup")
                .with_times(at(14, 0), at(14, 30)),
        ]);
        // 20:00 local on 2024-01-01
        let reference = Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap();

        let events = collect(&provider, reference, &tz(), None).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start.offset(), &tz());
        let window = provider.last_window().unwrap();
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap());
        assert_eq!(window.end, Utc.with_ymd_and_hms(2024, 1, 2, 4, 59, 59).unwrap());
    }

    #[tokio::test]
    async fn keeps_provider_order() {
        let provider = MemoryProvider::new(vec![
            RawEvent::new("late").with_summary("Late").with_start(at(20, 0)),
            RawEvent::new("early").with_summary("Early").with_start(at(14, 0)),
        ]);
        let reference = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();

        let events = collect(&provider, reference, &tz(), None).await.unwrap();
        let titles: Vec<_> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Late", "Early"]);
    }

    #[tokio::test]
    async fn missing_title_is_invalid_input() {
        let provider = MemoryProvider::new(vec![RawEvent::new("a").with_start(at(14, 0))]);
        let reference = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();

        let err = collect(&provider, reference, &tz(), None).await.unwrap_err();
        assert!(matches!(err, AgendaError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn query_failure_is_provider_unavailable() {
        let provider =
            MemoryProvider::new(vec![]).with_query_error(ProviderErrorCode::Io, "disk gone");
        let reference = Utc.with_ymd_and_hms(2024, 1, 1, 15, 0, 0).unwrap();

        let err = collect(&provider, reference, &tz(), None).await.unwrap_err();
        assert!(matches!(err, AgendaError::ProviderUnavailable(_)));
    }
}
