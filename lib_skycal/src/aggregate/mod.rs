//! # Aggregation
//!
//! Fans a year request out to every source and folds the answers into one
//! chronologically ordered sequence.
//!
//! ## Contained Modules:
//!
//! - **`aggregator`**: `EventAggregator`, generic over its feed source and its
//!   static repository, plus the `get_astronomy_events` convenience entry.
//! - **`tracker`**: generation-tagged year loads, so a slow answer for a year
//!   the user already left is dropped instead of overwriting newer data.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Concurrent fan-out over all sources.
pub mod aggregator;
/// Stale-load detection.
pub mod tracker;

pub use aggregator::{AggregatorError, EventAggregator, get_astronomy_events, sort_by_date};
pub use tracker::{LoadTicket, LoadTracker};
