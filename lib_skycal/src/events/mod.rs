//! # Event Model
//!
//! The common, normalized record every source is translated into. An `Event`
//! is built once by an adapter (or loaded from the catalog) and never mutated
//! afterwards; every calendar view borrows the same instances.
//!
//! ## Contained Modules:
//!
//! - **`event`**: `Event`, `EventKind`, `Intensity` and the canonical
//!   `YYYY-MM-DD` date key helpers.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// The `Event` value type and its enumerations.
pub mod event;

pub use event::{Event, EventDateError, EventKind, Intensity, date_key, month_prefix, parse_date_key};

/// Titles of the quarter phases the calendar does not display.
pub const QUARTER_PHASES: [&str; 2] = ["First Quarter", "Last Quarter"];

/// Drops quarter moon phases from an aggregated sequence.
///
/// The moon-phase adapter emits every phase it receives; the calendar only
/// shows New and Full Moon, so the filtering happens at the consumer.
pub fn without_quarter_phases(events: Vec<Event>) -> Vec<Event> {
    events
        .into_iter()
        .filter(|e| !QUARTER_PHASES.contains(&e.title()))
        .collect()
}
