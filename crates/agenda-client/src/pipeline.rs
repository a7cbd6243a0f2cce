//! The agenda pipeline.
//!
//! [`Pipeline::run`] drives one run from the provider's authorization state
//! to rendered markdown:
//!
//! ```text
//! NotDetermined ──request_access──┬─ granted ──► Authorized
//!                                 └─ refused ──► Denied
//! Authorized ──► collect ──► dedupe ──► render ──► writer
//! Denied     ──► "No access to calendars[: reason]"
//! Authorized ──► query refused ──► Denied
//! Other      ──► UnknownAuthorizationState
//! ```
//!
//! Nothing is collected until access is confirmed, and every run ends in
//! exactly one of the three outcomes.

use std::io::Write;

use agenda_core::{DATE_FORMAT, Settings, dedupe, render_agenda, start_of_day};
use agenda_providers::{AuthorizationStatus, CalendarProvider, ProviderError};
use chrono::{Local, NaiveDate, TimeZone};
use tokio::sync::oneshot;
use tracing::{debug, error, info};

use crate::collector::collect;
use crate::config::RunConfig;
use crate::error::{AgendaError, AgendaResult};

/// One agenda run against a calendar provider.
pub struct Pipeline<'a, Tz: TimeZone = Local> {
    provider: &'a dyn CalendarProvider,
    settings: Settings,
    calendars: Option<Vec<String>>,
    date_heading: bool,
    tz: Tz,
}

impl<'a> Pipeline<'a, Local> {
    /// Creates a pipeline rendering in the system zone.
    pub fn new(provider: &'a dyn CalendarProvider, settings: Settings) -> Self {
        Self {
            provider,
            settings,
            calendars: None,
            date_heading: false,
            tz: Local,
        }
    }

    /// Creates a pipeline from merged configuration.
    pub fn from_config(provider: &'a dyn CalendarProvider, config: &RunConfig) -> Self {
        Self::new(provider, config.settings)
            .with_calendars(config.calendars.clone())
            .with_date_heading(config.date_heading)
    }
}

impl<'a, Tz: TimeZone> Pipeline<'a, Tz> {
    /// Builder method to restrict the run to some calendars.
    pub fn with_calendars(mut self, calendars: Option<Vec<String>>) -> Self {
        self.calendars = calendars;
        self
    }

    /// Builder method to print the day as a heading.
    pub fn with_date_heading(mut self, enabled: bool) -> Self {
        self.date_heading = enabled;
        self
    }

    /// Returns a pipeline rendering in `tz` instead.
    pub fn with_timezone<T: TimeZone>(self, tz: T) -> Pipeline<'a, T> {
        Pipeline {
            provider: self.provider,
            settings: self.settings,
            calendars: self.calendars,
            date_heading: self.date_heading,
            tz,
        }
    }

    /// Runs the pipeline for the local day `day`, writing to `out`.
    ///
    /// On denial the access message is written to `out` and
    /// [`AgendaError::AccessDenied`] is returned.
    pub async fn run<W: Write>(&self, day: NaiveDate, out: &mut W) -> AgendaResult<()> {
        let status = self.provider.authorization_status();
        info!(provider = self.provider.name(), status = %status, "Calendar authorization");

        match status {
            AuthorizationStatus::Authorized => self.authorized(day, out).await,
            AuthorizationStatus::NotDetermined => match self.request_access().await? {
                (true, _) => {
                    info!("Calendar access granted");
                    self.authorized(day, out).await
                }
                (false, reason) => self.deny(reason.map(|e| e.message().to_string()), out),
            },
            AuthorizationStatus::Denied => self.deny(None, out),
            AuthorizationStatus::Other(state) => {
                error!(state = %state, "Unknown calendar authorization state");
                Err(AgendaError::UnknownAuthorizationState(state))
            }
        }
    }

    /// Asks the provider for access and waits for its single answer.
    async fn request_access(&self) -> AgendaResult<(bool, Option<ProviderError>)> {
        let (tx, rx) = oneshot::channel();
        debug!("Requesting calendar access");

        self.provider.request_access(Box::new(move |granted, error| {
            // The receiver only goes away if the run was abandoned.
            let _ = tx.send((granted, error));
        }));

        rx.await.map_err(|_| {
            error!("Access callback dropped without an answer");
            AgendaError::AccessCallbackDropped
        })
    }

    /// Renders the day. A provider refusing the query itself still ends the
    /// run in the denial outcome.
    async fn authorized<W: Write>(&self, day: NaiveDate, out: &mut W) -> AgendaResult<()> {
        match self.render(day, out).await {
            Err(AgendaError::AccessDenied { reason }) => self.deny(reason, out),
            other => other,
        }
    }

    async fn render<W: Write>(&self, day: NaiveDate, out: &mut W) -> AgendaResult<()> {
        let reference = start_of_day(day, &self.tz);
        let events = collect(self.provider, reference, &self.tz, self.calendars.as_deref()).await?;
        let events = dedupe(events);
        info!(count = events.len(), "Rendering agenda");

        if self.date_heading && !events.is_empty() {
            write!(out, "# {}\n\n", day.format(DATE_FORMAT))?;
        }

        let output = render_agenda(&events, &self.settings);
        if output.ends_with('\n') {
            out.write_all(output.as_bytes())?;
        } else {
            writeln!(out, "{}", output)?;
        }
        out.flush()?;
        Ok(())
    }

    fn deny<W: Write>(&self, reason: Option<String>, out: &mut W) -> AgendaResult<()> {
        let err = AgendaError::AccessDenied { reason };
        error!(error = %err, "Calendar access denied");
        writeln!(out, "{}", err)?;
        out.flush()?;
        Err(err)
    }
}
