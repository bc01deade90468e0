//! # Moon Phases
//!
//! `GET moon/phases/year?year=Y` →
//! `{ phasedata: [{ year, month, day, phase, time }] }`.
//!
//! Every phase in the feed becomes an event; dropping the quarter phases is
//! the consumer's job (`events::without_quarter_phases`).

use crate::events::{Event, EventKind, Intensity};
use crate::sources::feed::{FeedError, FeedSource, record_date};
use serde::Deserialize;
use tracing::{debug, warn};

/// Top-level moon-phase payload.
#[derive(Debug, Deserialize)]
pub struct MoonPhaseFeed {
    /// Phase records; absent when the feed reports an error instead.
    pub phasedata: Option<Vec<PhaseRecord>>,
}

/// One phase instant.
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseRecord {
    /// Year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month.
    pub day: u32,
    /// Phase name, e.g. "Full Moon".
    pub phase: String,
    /// UTC time, `HH:MM`.
    pub time: String,
}

/// Feed path for `year`.
pub fn feed_path(year: i32) -> String {
    format!("moon/phases/year?year={}", year)
}

/// Fetches and normalizes the moon phases of `year`.
///
/// Never fails: any error is logged and yields an empty list.
pub async fn fetch_moon_phases<S: FeedSource>(source: &S, year: i32) -> Vec<Event> {
    match try_fetch(source, year).await {
        Ok(events) => {
            debug!(year, count = events.len(), "moon phases normalized");
            events
        }
        Err(e) => {
            warn!(year, error = %e, "Error fetching moon phases, contributing no events");
            Vec::new()
        }
    }
}

async fn try_fetch<S: FeedSource>(source: &S, year: i32) -> Result<Vec<Event>, FeedError> {
    let raw = source.get_json(&feed_path(year)).await?;
    let feed: MoonPhaseFeed = serde_json::from_value(raw)?;
    let records = feed.phasedata.ok_or(FeedError::MissingField("phasedata"))?;
    records.iter().map(normalize).collect()
}

/// Translates one phase record into an `Event`.
pub fn normalize(record: &PhaseRecord) -> Result<Event, FeedError> {
    let date = record_date(record.year, record.month, record.day)?;

    let description = match record.phase.as_str() {
        "New Moon" => format!(
            "The Moon will be located on the same side of the Earth as the Sun and will not be \
             visible in the night sky. This phase occurs at {} UTC. This is the best time of the \
             month to observe faint objects such as galaxies and star clusters because there is \
             no moonlight to interfere.",
            record.time
        ),
        "Full Moon" => format!(
            "The Moon will be located on the opposite side of the Earth as the Sun and its face \
             will be fully illuminated. This phase occurs at {} UTC.",
            record.time
        ),
        other => format!("Moon Phase: {}", other),
    };

    let intensity = match record.phase.as_str() {
        "Full Moon" => Intensity::High,
        "New Moon" => Intensity::Low,
        _ => Intensity::Medium,
    };

    Ok(Event::new(
        date,
        record.phase.clone(),
        EventKind::MoonPhase,
        description,
        Some(intensity),
    ))
}
