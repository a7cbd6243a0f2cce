//! In-memory calendar provider.
//!
//! [`MemoryProvider`] serves a fixed list of [`RawEvent`]s and follows a
//! scripted authorization flow. It backs the pipeline tests and lets other
//! programs feed events they obtained elsewhere through the same pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use agenda_core::TimeWindow;
use tracing::debug;

use crate::error::{ProviderError, ProviderErrorCode, ProviderResult};
use crate::provider::{
    AccessCallback, AuthorizationStatus, BoxFuture, CalendarProvider, calendar_selected,
};
use crate::raw_event::RawEvent;

/// How a [`MemoryProvider`] answers an access request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessResponse {
    /// Grant access.
    Grant,
    /// Refuse access, with an optional reason.
    Deny(Option<String>),
    /// Drop the callback without answering.
    Ignore,
}

/// A provider backed by a list of events.
#[derive(Debug)]
pub struct MemoryProvider {
    status: Mutex<AuthorizationStatus>,
    response: AccessResponse,
    events: Vec<RawEvent>,
    query_error: Option<(ProviderErrorCode, String)>,
    last_window: Mutex<Option<TimeWindow>>,
    access_requests: AtomicUsize,
    queries: AtomicUsize,
}

impl MemoryProvider {
    /// Creates an authorized provider serving `events`.
    pub fn new(events: Vec<RawEvent>) -> Self {
        Self {
            status: Mutex::new(AuthorizationStatus::Authorized),
            response: AccessResponse::Grant,
            events,
            query_error: None,
            last_window: Mutex::new(None),
            access_requests: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
        }
    }

    /// Builder method to set the initial authorization status.
    pub fn with_status(self, status: AuthorizationStatus) -> Self {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
        self
    }

    /// Builder method to set the answer to access requests.
    pub fn with_access_response(mut self, response: AccessResponse) -> Self {
        self.response = response;
        self
    }

    /// Builder method to make every query fail.
    pub fn with_query_error(mut self, code: ProviderErrorCode, message: impl Into<String>) -> Self {
        self.query_error = Some((code, message.into()));
        self
    }

    /// Number of access requests received.
    pub fn access_requests(&self) -> usize {
        self.access_requests.load(Ordering::SeqCst)
    }

    /// Number of event queries received.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// The window of the most recent query.
    pub fn last_window(&self) -> Option<TimeWindow> {
        *self.last_window.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_status(&self, status: AuthorizationStatus) {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner) = status;
    }
}

impl CalendarProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.status
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn request_access(&self, completion: AccessCallback) {
        self.access_requests.fetch_add(1, Ordering::SeqCst);
        debug!(response = ?self.response, "Access requested");

        match self.response.clone() {
            AccessResponse::Grant => {
                self.set_status(AuthorizationStatus::Authorized);
                std::thread::spawn(move || completion(true, None));
            }
            AccessResponse::Deny(reason) => {
                self.set_status(AuthorizationStatus::Denied);
                let error = reason.map(|r| ProviderError::access_denied(r).with_provider("memory"));
                std::thread::spawn(move || completion(false, error));
            }
            AccessResponse::Ignore => drop(completion),
        }
    }

    /// Returns every stored event passing the calendar filter. The window is
    /// recorded but not applied.
    fn query_events<'a>(
        &'a self,
        window: &'a TimeWindow,
        calendars: Option<&'a [String]>,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>> {
        Box::pin(async move {
            self.queries.fetch_add(1, Ordering::SeqCst);
            *self.last_window.lock().unwrap_or_else(PoisonError::into_inner) = Some(*window);

            if let Some((code, message)) = &self.query_error {
                return Err(ProviderError::new(*code, message.clone()).with_provider("memory"));
            }

            Ok(self
                .events
                .iter()
                .filter(|e| calendar_selected(e.calendar.as_deref(), calendars))
                .cloned()
                .collect())
        })
    }
}
