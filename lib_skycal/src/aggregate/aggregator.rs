//! # Event Aggregator
//!
//! `get_events(year)` runs the three remote adapters concurrently, reads the
//! static repository, concatenates in the fixed order moon, seasons, solar,
//! static, and stable-sorts by date key. Same-day events are all kept and
//! keep that source order.

use crate::events::Event;
use crate::sources::{
    CatalogError, EventCatalog, EventRepository, FeedError, FeedSource, Observer, SourceSettings, UsnoClient,
    fetch_moon_phases, fetch_seasons, fetch_solar_eclipses,
};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Wiring failures. Once built, an aggregator never fails.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// The HTTP client could not be built.
    #[error("feed client: {0}")]
    Feed(#[from] FeedError),

    /// The static catalog is unreadable or corrupt.
    #[error("event catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// # Event Aggregator
///
/// Owns one feed source, shared by every adapter, and one static repository.
pub struct EventAggregator<S, R> {
    source: S,
    repository: R,
    observer: Observer,
}

impl<S: FeedSource, R: EventRepository> EventAggregator<S, R> {
    /// Assembles an aggregator from its parts.
    pub fn new(source: S, repository: R, observer: Observer) -> Self {
        Self {
            source,
            repository,
            observer,
        }
    }

    /// The observer used for eclipse visibility.
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// The static repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// All events of `year`, sorted by date. Never fails: broken sources
    /// simply contribute nothing.
    pub async fn get_events(&self, year: i32) -> Vec<Event> {
        let (moon, seasons, solar) = tokio::join!(
            fetch_moon_phases(&self.source, year),
            fetch_seasons(&self.source, year),
            fetch_solar_eclipses(&self.source, year, &self.observer),
        );
        let fixed = self.repository.events_for_year(year);

        info!(
            year,
            moon = moon.len(),
            seasons = seasons.len(),
            solar = solar.len(),
            catalog = fixed.len(),
            "year aggregated"
        );

        let mut events = Vec::with_capacity(moon.len() + seasons.len() + solar.len() + fixed.len());
        events.extend(moon);
        events.extend(seasons);
        events.extend(solar);
        events.extend(fixed);
        sort_by_date(&mut events);
        events
    }
}

impl EventAggregator<UsnoClient, EventCatalog> {
    /// Production wiring: USNO feeds plus the bundled catalog.
    pub fn usno(settings: &SourceSettings) -> Result<Self, AggregatorError> {
        Self::usno_with_catalog(settings, EventCatalog::bundled()?)
    }

    /// USNO feeds plus a catalog read from `path`.
    pub fn usno_with_catalog_file(settings: &SourceSettings, path: &Path) -> Result<Self, AggregatorError> {
        Self::usno_with_catalog(settings, EventCatalog::from_path(path)?)
    }

    /// USNO feeds plus an already loaded catalog.
    pub fn usno_with_catalog(settings: &SourceSettings, catalog: EventCatalog) -> Result<Self, AggregatorError> {
        let client = UsnoClient::new(settings)?;
        Ok(Self::new(client, catalog, settings.observer))
    }
}

/// Stable ascending sort on the `YYYY-MM-DD` key.
pub fn sort_by_date(events: &mut [Event]) {
    events.sort_by(|a, b| a.date().cmp(b.date()));
}

/// Events of `year` from the USNO feeds and the bundled catalog, with
/// default settings.
pub async fn get_astronomy_events(year: i32) -> Result<Vec<Event>, AggregatorError> {
    let aggregator = EventAggregator::usno(&SourceSettings::default())?;
    Ok(aggregator.get_events(year).await)
}
