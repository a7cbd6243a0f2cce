//! ICS file calendar provider implementation.

use std::io;
use std::path::{Path, PathBuf};

use agenda_core::TimeWindow;
use chrono::{Local, TimeZone, Utc};
use tracing::{debug, info, warn};

use crate::error::{ProviderError, ProviderResult};
use crate::normalize::normalize_event;
use crate::provider::{
    AccessCallback, AuthorizationStatus, BoxFuture, CalendarProvider, calendar_selected,
};
use crate::raw_event::RawEvent;

use super::config::{IcsConfig, is_ics_file};
use super::parse::parse_calendar;

const PROVIDER_NAME: &str = "ics";

/// ICS file calendar provider.
///
/// Reads events from local iCalendar files. Wall-clock times in the files
/// are interpreted in the zone `Tz`, the system zone by default.
#[derive(Debug, Clone)]
pub struct IcsProvider<Tz: TimeZone = Local> {
    config: IcsConfig,
    tz: Tz,
}

impl IcsProvider<Local> {
    /// Creates a new ICS provider reading times in the system zone.
    pub fn new(config: IcsConfig) -> Self {
        Self { config, tz: Local }
    }
}

impl<Tz: TimeZone> IcsProvider<Tz> {
    /// Returns a provider reading times in `tz` instead.
    pub fn with_timezone<T: TimeZone>(self, tz: T) -> IcsProvider<T> {
        IcsProvider {
            config: self.config,
            tz,
        }
    }

    /// Checks every source, returning the first problem found.
    fn check_sources(&self) -> Result<(), (AuthorizationStatus, String)> {
        if self.config.is_empty() {
            return Err((
                AuthorizationStatus::NotDetermined,
                "no calendar sources configured".to_string(),
            ));
        }

        for source in &self.config.sources {
            let result = if source.is_dir() {
                std::fs::read_dir(source).map(drop)
            } else {
                std::fs::File::open(source).map(drop)
            };

            if let Err(e) = result {
                let status = match e.kind() {
                    io::ErrorKind::NotFound => AuthorizationStatus::NotDetermined,
                    io::ErrorKind::PermissionDenied => AuthorizationStatus::Denied,
                    _ => AuthorizationStatus::Other(format!("unreadable ({})", e.kind())),
                };
                return Err((status, format!("{}: {}", source.display(), e)));
            }
        }

        Ok(())
    }

    /// Expands directory sources into the calendar files they hold.
    async fn calendar_files(&self) -> ProviderResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for source in &self.config.sources {
            let metadata = tokio::fs::metadata(source)
                .await
                .map_err(|e| io_error(source, e))?;

            if !metadata.is_dir() {
                files.push(source.clone());
                continue;
            }

            let mut entries = tokio::fs::read_dir(source)
                .await
                .map_err(|e| io_error(source, e))?;
            let mut found = Vec::new();
            while let Some(entry) = entries.next_entry().await.map_err(|e| io_error(source, e))? {
                let path = entry.path();
                if is_ics_file(&path) {
                    found.push(path);
                }
            }
            found.sort();

            debug!(dir = %source.display(), count = found.len(), "Found calendar files");
            files.extend(found);
        }

        Ok(files)
    }

    /// Returns true if the event should be handed to the caller.
    ///
    /// Events that do not normalize are kept so the caller sees the error.
    fn in_window(&self, event: &RawEvent, window: &TimeWindow) -> bool {
        match normalize_event(event, &self.tz) {
            Ok(record) => window.intersects(
                record.start.with_timezone(&Utc),
                record.end.with_timezone(&Utc),
            ),
            Err(_) => true,
        }
    }
}

impl<Tz> CalendarProvider for IcsProvider<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        match self.check_sources() {
            Ok(()) => AuthorizationStatus::Authorized,
            Err((status, reason)) => {
                debug!(status = %status, reason = %reason, "Calendar sources not readable");
                status
            }
        }
    }

    fn request_access(&self, completion: AccessCallback) {
        match self.check_sources() {
            Ok(()) => completion(true, None),
            Err((_, reason)) => {
                warn!(reason = %reason, "Calendar access not granted");
                completion(
                    false,
                    Some(ProviderError::access_denied(reason).with_provider(PROVIDER_NAME)),
                );
            }
        }
    }

    fn query_events<'a>(
        &'a self,
        window: &'a TimeWindow,
        calendars: Option<&'a [String]>,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>> {
        Box::pin(async move {
            let mut events = Vec::new();

            for file in self.calendar_files().await? {
                let content = tokio::fs::read_to_string(&file)
                    .await
                    .map_err(|e| io_error(&file, e))?;

                let parsed = parse_calendar(&content, &file_stem(&file)).map_err(|e| {
                    ProviderError::parse(format!("{}: {}", file.display(), e.message()))
                        .with_provider(PROVIDER_NAME)
                })?;

                events.extend(parsed.into_iter().filter(|event| {
                    calendar_selected(event.calendar.as_deref(), calendars)
                        && self.in_window(event, window)
                }));
            }

            info!(
                count = events.len(),
                start = %window.start,
                end = %window.end,
                "Queried calendar files"
            );

            Ok(events)
        })
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn io_error(path: &Path, error: io::Error) -> ProviderError {
    let message = format!("{}: {}", path.display(), error);
    let err = match error.kind() {
        io::ErrorKind::NotFound => ProviderError::unavailable(message),
        io::ErrorKind::PermissionDenied => ProviderError::access_denied(message),
        _ => ProviderError::io(message),
    };
    err.with_provider(PROVIDER_NAME).with_source(error)
}
