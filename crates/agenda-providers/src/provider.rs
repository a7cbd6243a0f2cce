//! CalendarProvider trait definition.
//!
//! This module defines the [`CalendarProvider`] trait, the seam between the
//! agenda pipeline and whatever holds the user's calendars.
//!
//! Providers are responsible for:
//! - Reporting whether calendar access has been granted
//! - Requesting access (once, with a completion callback)
//! - Returning the raw events that intersect a time window

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use agenda_core::TimeWindow;

use crate::error::{ProviderError, ProviderResult};
use crate::raw_event::RawEvent;

/// Calendar access authorization state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// Access has been granted.
    Authorized,
    /// Access has been refused.
    Denied,
    /// Access has not been requested yet.
    NotDetermined,
    /// A provider-specific state outside the three above.
    Other(String),
}

impl fmt::Display for AuthorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authorized => write!(f, "authorized"),
            Self::Denied => write!(f, "denied"),
            Self::NotDetermined => write!(f, "not determined"),
            Self::Other(state) => write!(f, "{}", state),
        }
    }
}

/// Completion callback for [`CalendarProvider::request_access`].
///
/// Called at most once, possibly from another thread, with whether access
/// was granted and the reason when it was not.
pub type AccessCallback = Box<dyn FnOnce(bool, Option<ProviderError>) + Send + 'static>;

/// A boxed future for async trait methods.
///
/// This is used because async functions in traits are not yet stable in a way
/// that works well with dynamic dispatch. Using boxed futures allows the trait
/// to be object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The core abstraction for calendar providers.
///
/// # Implementation Notes
///
/// - Implementations should be `Send + Sync` for use in async contexts
/// - `query_events` returns events in source order; callers impose ordering
/// - Recurring events are not expanded
pub trait CalendarProvider: Send + Sync {
    /// Returns the name/type of this provider (e.g., "ics", "memory").
    fn name(&self) -> &str;

    /// Returns the current authorization state without prompting.
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Requests calendar access.
    ///
    /// `completion` is invoked once with the outcome. A provider that drops
    /// the callback without calling it signals that no answer will come.
    fn request_access(&self, completion: AccessCallback);

    /// Fetches every event intersecting `window`.
    ///
    /// `calendars` restricts the query to the named calendars; `None` means
    /// all calendars.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the source cannot be read or parsed.
    fn query_events<'a>(
        &'a self,
        window: &'a TimeWindow,
        calendars: Option<&'a [String]>,
    ) -> BoxFuture<'a, ProviderResult<Vec<RawEvent>>>;
}

/// Returns true when `calendar` passes an optional calendar filter.
pub fn calendar_selected(calendar: Option<&str>, filter: Option<&[String]>) -> bool {
    match filter {
        None => true,
        Some(names) => calendar.is_some_and(|c| names.iter().any(|n| n == c)),
    }
}
