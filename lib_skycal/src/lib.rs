//! # lib_skycal
//!
//! Aggregates astronomical events for a calendar year from several independent
//! sources (USNO moon phases, seasons and solar eclipses, plus a bundled
//! catalog of lunar eclipses and planetary events) and provides the calendar
//! view logic that consumes the merged stream.
//!
//! Modules are gated by features named after their folder, `full` enables all.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// The normalized `Event` model.
#[cfg(feature = "events")]
pub mod events;
/// Generic HTTP retrieval.
#[cfg(feature = "retrieve")]
pub mod retrieve;
/// Feed adapters and the static event catalog.
#[cfg(feature = "sources")]
pub mod sources;
/// Concurrent aggregation of all sources.
#[cfg(feature = "aggregate")]
pub mod aggregate;
/// Calendar view model.
#[cfg(feature = "calendar")]
pub mod calendar;
/// tracing subscriber setup.
#[cfg(feature = "loggers")]
pub mod loggers;

#[cfg(feature = "aggregate")]
pub use aggregate::{EventAggregator, get_astronomy_events};
#[cfg(feature = "events")]
pub use events::{Event, EventKind, Intensity};
