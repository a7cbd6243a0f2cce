//! De-duplication of collected events.
//!
//! Calendar sources commonly yield the same meeting more than once (an
//! invitation copied to several calendars, a forwarded invite). [`dedupe`]
//! collapses those into one event per [`identity_key`].

use std::collections::HashSet;

use tracing::debug;

use crate::event::EventRecord;
use crate::identity::identity_key;

/// Removes canceled events and duplicates, then orders by start time.
///
/// The first event seen for an identity key is kept and later events with
/// the same key are dropped without merging. Events sharing a start time
/// keep their relative input order (stable sort, no secondary key).
pub fn dedupe<I>(events: I) -> Vec<EventRecord>
where
    I: IntoIterator<Item = EventRecord>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for event in events {
        if event.is_canceled() {
            debug!(title = %event.title, "Skipping canceled event");
            continue;
        }

        let key = identity_key(&event);
        if seen.insert(key) {
            unique.push(event);
        } else {
            debug!(title = %event.title, "Dropping duplicate event");
        }
    }

    unique.sort_by_key(|event| event.start);
    unique
}
