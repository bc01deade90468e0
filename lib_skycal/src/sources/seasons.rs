//! # Seasons
//!
//! `GET seasons?year=Y` → `{ data: [{ phenom, year, month, day, time }] }`.
//!
//! Equinoxes and solstices are renamed after their month, perihelion and
//! aphelion get fixed explanations, anything else gets a generic line.

use crate::events::{Event, EventKind, Intensity};
use crate::sources::feed::{FeedError, FeedSource, record_date};
use serde::Deserialize;
use tracing::{debug, warn};

const MARCH_EQUINOX: &str = "The Sun will shine directly on the equator and there will be nearly \
    equal amounts of day and night throughout the world. This is also the first day of spring \
    (vernal equinox) in the Northern Hemisphere and the first day of fall (autumnal equinox) in \
    the Southern Hemisphere.";

const SEPTEMBER_EQUINOX: &str = "The Sun will shine directly on the equator and there will be \
    nearly equal amounts of day and night throughout the world. This is also the first day of \
    fall (autumnal equinox) in the Northern Hemisphere and the first day of spring (vernal \
    equinox) in the Southern Hemisphere.";

const JUNE_SOLSTICE: &str = "The North Pole of the earth will be tilted toward the Sun, which will \
    have reached its northernmost position in the sky and will be directly over the Tropic of \
    Cancer. This is the first day of summer (summer solstice) in the Northern Hemisphere and the \
    first day of winter (winter solstice) in the Southern Hemisphere.";

const DECEMBER_SOLSTICE: &str = "The South Pole of the earth will be tilted toward the Sun, which \
    will have reached its southernmost position in the sky and will be directly over the Tropic \
    of Capricorn. This is the first day of winter (winter solstice) in the Northern Hemisphere \
    and the first day of summer (summer solstice) in the Southern Hemisphere.";

const PERIHELION: &str = "Earth reaches the closest point to the Sun in its yearly orbit. This \
    slightly increases the Sun’s apparent size and the amount of sunlight Earth receives overall.";

const APHELION: &str = "Earth reaches the farthest point from the Sun in its yearly orbit. The \
    Sun appears a tiny bit smaller and Earth receives slightly less sunlight compared to \
    perihelion.";

/// Top-level seasons payload.
#[derive(Debug, Deserialize)]
pub struct SeasonsFeed {
    /// Phenomena of the year; absent on error.
    pub data: Option<Vec<SeasonRecord>>,
}

/// One seasonal phenomenon.
#[derive(Debug, Clone, Deserialize)]
pub struct SeasonRecord {
    /// "Equinox", "Solstice", "Perihelion", "Aphelion", ...
    pub phenom: String,
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// UTC time, `HH:MM`.
    pub time: String,
}

/// Feed path for `year`.
pub fn feed_path(year: i32) -> String {
    format!("seasons?year={}", year)
}

/// Fetches and normalizes the seasonal phenomena of `year`.
///
/// Never fails: any error is logged and yields an empty list.
pub async fn fetch_seasons<S: FeedSource>(source: &S, year: i32) -> Vec<Event> {
    match try_fetch(source, year).await {
        Ok(events) => {
            debug!(year, count = events.len(), "seasons normalized");
            events
        }
        Err(e) => {
            warn!(year, error = %e, "Error fetching seasons, contributing no events");
            Vec::new()
        }
    }
}

async fn try_fetch<S: FeedSource>(source: &S, year: i32) -> Result<Vec<Event>, FeedError> {
    let raw = source.get_json(&feed_path(year)).await?;
    let feed: SeasonsFeed = serde_json::from_value(raw)?;
    let records = feed.data.ok_or(FeedError::MissingField("data"))?;
    records.iter().map(normalize).collect()
}

/// Translates one phenomenon into an `Event`.
pub fn normalize(record: &SeasonRecord) -> Result<Event, FeedError> {
    let date = record_date(record.year, record.month, record.day)?;
    let first_half = record.month < 7;

    let (title, description) = match record.phenom.as_str() {
        "Equinox" if first_half => ("March Equinox".to_string(), MARCH_EQUINOX.to_string()),
        "Equinox" => ("September Equinox".to_string(), SEPTEMBER_EQUINOX.to_string()),
        "Solstice" if first_half => ("June Solstice".to_string(), JUNE_SOLSTICE.to_string()),
        "Solstice" => ("December Solstice".to_string(), DECEMBER_SOLSTICE.to_string()),
        "Perihelion" => (record.phenom.clone(), PERIHELION.to_string()),
        "Aphelion" => (record.phenom.clone(), APHELION.to_string()),
        other => (other.to_string(), format!("{} occurs at {} UTC.", other, record.time)),
    };

    Ok(Event::new(
        date,
        title,
        EventKind::CelestialEvent,
        description,
        Some(Intensity::Medium),
    ))
}
