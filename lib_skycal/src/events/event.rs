use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// Canonical on-the-wire date format. Zero padding makes lexical order equal
/// chronological order.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raised when a date string is not a canonical `YYYY-MM-DD` calendar date.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid event date `{0}` (expected zero-padded YYYY-MM-DD)")]
pub struct EventDateError(pub String);

/// Formats a calendar date as its canonical `YYYY-MM-DD` key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats the `YYYY-MM` prefix shared by every key of a month.
pub fn month_prefix(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Parses a canonical date key, rejecting anything that would not survive a
/// round trip (missing padding, impossible days).
pub fn parse_date_key(key: &str) -> Result<NaiveDate, EventDateError> {
    NaiveDate::parse_from_str(key, DATE_FORMAT)
        .ok()
        .filter(|d| date_key(*d) == key)
        .ok_or_else(|| EventDateError(key.to_string()))
}

/// # Event Kind
///
/// The rendering category of an event. The five known kinds come from the
/// adapters and the catalog; catalogs may introduce further kinds, which are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventKind {
    /// `moon-phase`
    MoonPhase,
    /// `celestial-event` (equinoxes, solstices, perihelion, aphelion)
    CelestialEvent,
    /// `solar-eclipse`
    SolarEclipse,
    /// `lunar-eclipse`
    LunarEclipse,
    /// `planet-event` (oppositions, elongations)
    PlanetEvent,
    /// Any other kind string found in a catalog.
    Other(String),
}

impl EventKind {
    /// The kebab-case identifier of the kind.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::MoonPhase => "moon-phase",
            EventKind::CelestialEvent => "celestial-event",
            EventKind::SolarEclipse => "solar-eclipse",
            EventKind::LunarEclipse => "lunar-eclipse",
            EventKind::PlanetEvent => "planet-event",
            EventKind::Other(kind) => kind,
        }
    }

    /// Badge text: the identifier with its first hyphen turned into a space.
    pub fn badge(&self) -> String {
        self.as_str().replacen('-', " ", 1)
    }
}

impl From<String> for EventKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "moon-phase" => EventKind::MoonPhase,
            "celestial-event" => EventKind::CelestialEvent,
            "solar-eclipse" => EventKind::SolarEclipse,
            "lunar-eclipse" => EventKind::LunarEclipse,
            "planet-event" => EventKind::PlanetEvent,
            _ => EventKind::Other(value),
        }
    }
}

impl From<EventKind> for String {
    fn from(value: EventKind) -> Self {
        match value {
            EventKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visual-salience hint attached to some events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Intensity {
    /// Low salience.
    Low,
    /// Medium salience.
    Medium,
    /// High salience.
    High,
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        };
        f.write_str(label)
    }
}

/// # Event
///
/// One astronomical occurrence on one calendar day.
///
/// Fields are private: an `Event` is either built by `Event::new` from a real
/// `NaiveDate` or deserialized from a record whose date is validated, so the
/// `date` string is always a canonical key. The serialized shape is
/// `{ date, title, type, description, intensity? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_date_key")]
    date: String,
    title: String,
    #[serde(rename = "type")]
    kind: EventKind,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intensity: Option<Intensity>,
}

impl Event {
    /// Builds an event on `date`.
    pub fn new(
        date: NaiveDate,
        title: impl Into<String>,
        kind: EventKind,
        description: impl Into<String>,
        intensity: Option<Intensity>,
    ) -> Self {
        Self {
            date: date_key(date),
            title: title.into(),
            kind,
            description: description.into(),
            intensity,
        }
    }

    /// The canonical `YYYY-MM-DD` key.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The date as a calendar value.
    pub fn naive_date(&self) -> NaiveDate {
        // The key is validated on every construction path.
        NaiveDate::parse_from_str(&self.date, DATE_FORMAT).unwrap_or_default()
    }

    /// Display name.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Rendering category.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Source-specific explanation, composed at normalization time.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Optional salience hint.
    pub fn intensity(&self) -> Option<Intensity> {
        self.intensity
    }

    /// True when the event falls on the day with key `key`.
    pub fn is_on(&self, key: &str) -> bool {
        self.date == key
    }

    /// True when the event's key starts with `prefix` (a year or `YYYY-MM`).
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.date.starts_with(prefix)
    }
}

fn deserialize_date_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_key(&raw).map_err(serde::de::Error::custom)?;
    Ok(raw)
}
