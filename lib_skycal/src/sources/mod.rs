//! # Event Sources
//!
//! Every source of astronomical events, each translating its own schema into
//! the common `Event` shape.
//!
//! ## Contained Modules:
//!
//! - **`feed`**: the `FeedSource` seam between adapters and HTTP, the USNO
//!   client implementing it, and the `FeedError` taxonomy.
//! - **`settings`**: base URL, observer coordinate and transport settings.
//! - **`moon_phases`**, **`seasons`**, **`solar_eclipses`**: the three remote
//!   adapters. Each returns an empty list instead of failing.
//! - **`catalog`**: the bundled, pre-computed dataset of lunar eclipses and
//!   planetary events, exposed through the `EventRepository` trait.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Static event catalog.
pub mod catalog;
/// Feed access trait, USNO client and errors.
pub mod feed;
#[cfg(test)]
pub(crate) mod fake;
/// Moon-phase adapter.
pub mod moon_phases;
/// Seasons adapter.
pub mod seasons;
/// Source settings.
pub mod settings;
/// Solar-eclipse adapter with local visibility lookups.
pub mod solar_eclipses;

pub use catalog::{CatalogError, EventCatalog, EventRepository};
pub use feed::{FeedError, FeedSource, UsnoClient};
pub use moon_phases::fetch_moon_phases;
pub use seasons::fetch_seasons;
pub use settings::{Observer, SourceSettings};
pub use solar_eclipses::fetch_solar_eclipses;
