//! CalendarProvider trait and implementations.
//!
//! This crate provides the abstraction layer between the agenda pipeline and
//! wherever calendar events live:
//!
//! - [`CalendarProvider`] - The trait every calendar source implements
//! - [`RawEvent`] - Provider-agnostic raw event data
//! - [`normalize_event`] - Validation of raw events into [`agenda_core::EventRecord`]
//! - [`ProviderError`] - Error types for provider operations
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   .ics files    │    │  Vec<RawEvent>  │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          ▼                      ▼
//! ┌─────────────────┐    ┌─────────────────┐
//! │   IcsProvider   │    │ MemoryProvider  │
//! └────────┬────────┘    └────────┬────────┘
//!          │                      │
//!          │   CalendarProvider   │
//!          └──────────┬───────────┘
//!                     │
//!                     ▼
//!              ┌─────────────┐
//!              │  RawEvent   │
//!              └──────┬──────┘
//!                     │
//!                     ▼ normalize_event()
//!              ┌──────────────┐
//!              │ EventRecord  │
//!              └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use agenda_providers::{CalendarProvider, normalize_events};
//!
//! async fn today(provider: &dyn CalendarProvider, window: &TimeWindow) -> Vec<EventRecord> {
//!     let raw = provider.query_events(window, None).await?;
//!     normalize_events(&raw, &chrono::Local)?
//! }
//! ```

pub mod error;
#[cfg(feature = "ics")]
pub mod ics;
pub mod memory;
pub mod normalize;
pub mod provider;
pub mod raw_event;

// Re-export main types at crate root
pub use error::{ProviderError, ProviderErrorCode, ProviderResult};
pub use memory::{AccessResponse, MemoryProvider};
pub use normalize::{normalize_event, normalize_events};
pub use provider::{
    AccessCallback, AuthorizationStatus, BoxFuture, CalendarProvider, calendar_selected,
};
pub use raw_event::{RawEvent, RawEventTime};
