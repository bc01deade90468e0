//! # Solar Eclipses
//!
//! Two-stage adapter:
//!
//! 1. `GET eclipses/solar/year?year=Y` →
//!    `{ eclipses_in_year: [{ year, month, day, event }] }`
//! 2. one `GET eclipses/solar/date?date=YYYY-MM-DD&coords=LAT,LON&height=H`
//!    per eclipse → `{ description }` or `{ error }`.
//!
//! The per-eclipse lookups run concurrently and are joined before returning.
//! A failed lookup only shortens the description; it never drops the eclipse.
//! The lookups are not rate limited: a year has two to four solar eclipses.

use crate::events::{Event, EventKind, Intensity, date_key};
use crate::sources::feed::{FeedError, FeedSource, record_date};
use crate::sources::settings::Observer;
use chrono::NaiveDate;
use futures_util::future::join_all;
use serde::Deserialize;
use tracing::{debug, warn};

/// Text every solar-eclipse event starts with.
pub const BASE_DESCRIPTION: &str = "A solar eclipse occurs when the Moon passes between Earth \
    and the Sun and casts its shadow on Earth. Depending on the alignment, observers may see a \
    partial eclipse, an annular “ring of fire,” or a total eclipse with the Sun’s corona visible.";

/// Title shared by every solar-eclipse event.
pub const TITLE: &str = "Solar Eclipse";

/// Top-level year listing.
#[derive(Debug, Deserialize)]
pub struct SolarEclipseYearFeed {
    /// Eclipses of the year; absent on error.
    pub eclipses_in_year: Option<Vec<EclipseRecord>>,
}

/// One eclipse of the year listing.
#[derive(Debug, Clone, Deserialize)]
pub struct EclipseRecord {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Feed's own label, e.g. "Total Solar Eclipse of 2026 August 12".
    #[serde(default)]
    pub event: String,
}

/// Local circumstances payload.
#[derive(Debug, Default, Deserialize)]
pub struct EclipseVisibility {
    /// Human-readable circumstances when visible.
    pub description: Option<String>,
    /// Error text, e.g. "... is not visible from this location".
    pub error: Option<String>,
}

/// Outcome of a visibility lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalVisibility {
    /// Visible, with the feed's description.
    Visible(String),
    /// The feed says the eclipse cannot be seen from the observer.
    NotVisible,
    /// Lookup failed or said nothing useful.
    Unknown,
}

impl From<EclipseVisibility> for LocalVisibility {
    fn from(value: EclipseVisibility) -> Self {
        match (value.error, value.description) {
            (None, Some(description)) if !description.is_empty() => LocalVisibility::Visible(description),
            (Some(error), _) if error.contains("not visible") => LocalVisibility::NotVisible,
            _ => LocalVisibility::Unknown,
        }
    }
}

/// Year-listing path.
pub fn feed_path(year: i32) -> String {
    format!("eclipses/solar/year?year={}", year)
}

/// Visibility-lookup path for one eclipse date.
pub fn visibility_path(date: NaiveDate, observer: &Observer) -> String {
    format!(
        "eclipses/solar/date?date={}&coords={},{}&height={}",
        date_key(date),
        observer.latitude,
        observer.longitude,
        observer.height
    )
}

/// Composes the event description from the lookup outcome.
pub fn describe(visibility: &LocalVisibility, observer: &Observer) -> String {
    match visibility {
        LocalVisibility::Visible(local) => format!("{} Local visibility: {}", BASE_DESCRIPTION, local),
        LocalVisibility::NotVisible => format!(
            "{} Note: Not visible from your location ({}, {}).",
            BASE_DESCRIPTION, observer.latitude, observer.longitude
        ),
        LocalVisibility::Unknown => BASE_DESCRIPTION.to_string(),
    }
}

/// Fetches the solar eclipses of `year` with local visibility for `observer`.
///
/// Never fails: a broken year listing is logged and yields an empty list.
pub async fn fetch_solar_eclipses<S: FeedSource>(source: &S, year: i32, observer: &Observer) -> Vec<Event> {
    match try_fetch(source, year, observer).await {
        Ok(events) => {
            debug!(year, count = events.len(), "solar eclipses normalized");
            events
        }
        Err(e) => {
            warn!(year, error = %e, "Error fetching solar eclipses, contributing no events");
            Vec::new()
        }
    }
}

async fn try_fetch<S: FeedSource>(source: &S, year: i32, observer: &Observer) -> Result<Vec<Event>, FeedError> {
    let raw = source.get_json(&feed_path(year)).await?;
    let feed: SolarEclipseYearFeed = serde_json::from_value(raw)?;
    let eclipses = feed
        .eclipses_in_year
        .ok_or(FeedError::MissingField("eclipses_in_year"))?;

    let dates = eclipses
        .iter()
        .map(|e| record_date(e.year, e.month, e.day))
        .collect::<Result<Vec<_>, _>>()?;

    // Fan out one lookup per eclipse, fan in before building events.
    let lookups = dates.iter().map(|date| lookup_visibility(source, *date, observer));
    let visibilities = join_all(lookups).await;

    Ok(dates
        .into_iter()
        .zip(visibilities)
        .map(|(date, visibility)| {
            Event::new(
                date,
                TITLE,
                EventKind::SolarEclipse,
                describe(&visibility, observer),
                Some(Intensity::High),
            )
        })
        .collect())
}

/// Asks the feed how the eclipse on `date` looks from `observer`.
pub async fn lookup_visibility<S: FeedSource>(source: &S, date: NaiveDate, observer: &Observer) -> LocalVisibility {
    let parsed = match source.get_json(&visibility_path(date, observer)).await {
        Ok(value) => serde_json::from_value::<EclipseVisibility>(value).ok(),
        // The feed explains refusals in a JSON error body.
        Err(FeedError::Http { body: Some(body), .. }) => serde_json::from_str::<EclipseVisibility>(&body).ok(),
        Err(e) => {
            debug!(date = %date, error = %e, "visibility lookup failed");
            None
        }
    };

    parsed.map(LocalVisibility::from).unwrap_or(LocalVisibility::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::fake::FakeFeed;
    use serde_json::json;
    use std::time::Duration;

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn year_listing() -> serde_json::Value {
        json!({ "eclipses_in_year": [
            { "year": 2026, "month": 2, "day": 17, "event": "Annular Solar Eclipse of 2026 February 17" },
            { "year": 2026, "month": 8, "day": 12, "event": "Total Solar Eclipse of 2026 August 12" }
        ]})
    }

    #[test]
    fn visibility_path_embeds_observer() {
        let path = visibility_path(day(8, 12), &Observer::default());
        assert_eq!(path, "eclipses/solar/date?date=2026-08-12&coords=26.4669,73.1147&height=0");
    }

    #[test]
    fn descriptions_follow_visibility() {
        let observer = Observer::default();
        assert_eq!(describe(&LocalVisibility::Unknown, &observer), BASE_DESCRIPTION);
        assert!(
            describe(&LocalVisibility::Visible("Partial eclipse, 40% obscured.".into()), &observer)
                .ends_with(" Local visibility: Partial eclipse, 40% obscured.")
        );
        assert!(
            describe(&LocalVisibility::NotVisible, &observer)
                .ends_with(" Note: Not visible from your location (26.4669, 73.1147).")
        );
    }

    #[test]
    fn visibility_payload_classification() {
        let visible = EclipseVisibility { description: Some("Sun partially covered".into()), error: None };
        assert_eq!(LocalVisibility::from(visible), LocalVisibility::Visible("Sun partially covered".into()));

        let hidden = EclipseVisibility { description: None, error: Some("Eclipse is not visible from this location".into()) };
        assert_eq!(LocalVisibility::from(hidden), LocalVisibility::NotVisible);

        let other = EclipseVisibility { description: None, error: Some("Invalid date".into()) };
        assert_eq!(LocalVisibility::from(other), LocalVisibility::Unknown);

        let empty = EclipseVisibility { description: Some(String::new()), error: None };
        assert_eq!(LocalVisibility::from(empty), LocalVisibility::Unknown);
    }

    #[tokio::test]
    async fn lookups_enrich_each_eclipse() {
        let observer = Observer::default();
        let feed = FakeFeed::new()
            .json(feed_path(2026), year_listing())
            .status(
                visibility_path(day(2, 17), &observer),
                400,
                Some(r#"{ "error": "The solar eclipse is not visible from this location." }"#),
            )
            .json(visibility_path(day(8, 12), &observer), json!({ "description": "Partial eclipse at sunset." }));

        let events = fetch_solar_eclipses(&feed, 2026, &observer).await;

        assert_eq!(events.len(), 2);
        assert!(events[0].description().contains("Note: Not visible from your location"));
        assert!(events[1].description().ends_with("Local visibility: Partial eclipse at sunset."));
        assert!(events.iter().all(|e| e.title() == TITLE && e.intensity() == Some(Intensity::High)));
    }

    #[tokio::test]
    async fn failed_lookup_keeps_the_eclipse() {
        let feed = FakeFeed::new().json(feed_path(2026), year_listing());

        let events = fetch_solar_eclipses(&feed, 2026, &Observer::default()).await;

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.description() == BASE_DESCRIPTION));
    }

    #[tokio::test]
    async fn lookup_order_does_not_change_output_order() {
        let observer = Observer::default();
        let feed = FakeFeed::new()
            .json(feed_path(2026), year_listing())
            .json(visibility_path(day(2, 17), &observer), json!({ "description": "first" }))
            .json(visibility_path(day(8, 12), &observer), json!({ "description": "second" }))
            .delayed(visibility_path(day(2, 17), &observer), Duration::from_millis(30));

        let events = fetch_solar_eclipses(&feed, 2026, &observer).await;

        assert!(events[0].description().ends_with("first"));
        assert!(events[1].description().ends_with("second"));
    }

    #[tokio::test]
    async fn broken_listing_yields_nothing() {
        let feed = FakeFeed::new().json(feed_path(2026), json!({ "error": "bad year" }));
        assert!(fetch_solar_eclipses(&feed, 2026, &Observer::default()).await.is_empty());
    }
}
