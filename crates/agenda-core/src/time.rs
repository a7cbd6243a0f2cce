//! Time windows for querying calendar events.
//!
//! [`TimeWindow::for_day`] builds the window an agenda covers: local midnight
//! through the last second of the same day.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A closed time interval `[start, end]` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (inclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `start` is after `end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Creates the window for a single local day: from local midnight to one
    /// second before the next local midnight.
    ///
    /// The day is measured on the local calendar, so DST days span 23 or 25
    /// hours.
    pub fn for_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Self {
        let start = start_of_day(date, tz);
        let end = match date.succ_opt() {
            Some(next) => start_of_day(next, tz) - Duration::seconds(1),
            // Last representable day: no next midnight to step back from.
            None => date
                .and_hms_opt(23, 59, 59)
                .map_or(start, |last| local_instant(last, tz)),
        };
        Self { start, end }
    }

    /// Creates the window for the local day containing `instant`.
    pub fn day_containing<Tz: TimeZone>(instant: DateTime<Utc>, tz: &Tz) -> Self {
        Self::for_day(instant.with_timezone(tz).date_naive(), tz)
    }

    /// Checks if an event interval intersects this window.
    ///
    /// An event that ends exactly at the window start does not intersect;
    /// a zero-length event inside the window does.
    pub fn intersects(&self, event_start: DateTime<Utc>, event_end: DateTime<Utc>) -> bool {
        event_start <= self.end && (event_end > self.start || event_start >= self.start)
    }
}

/// Returns local midnight of `date` as a UTC instant.
///
/// When midnight does not exist locally (a DST gap at midnight), the naive
/// midnight is read as UTC.
pub fn start_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> DateTime<Utc> {
    local_instant(date.and_time(NaiveTime::default()), tz)
}

fn local_instant<Tz: TimeZone>(local: NaiveDateTime, tz: &Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}
