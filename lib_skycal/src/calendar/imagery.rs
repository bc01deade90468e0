//! Picture and moon-glyph selection for events.
//!
//! Matching is a case-insensitive substring test on the title (and, for
//! eclipses, the kind). Rules are tried in a fixed order and the first hit
//! wins, so "Full Moon" beats any planet that might appear in the same title.

use crate::events::{Event, EventKind};
use std::fmt;

/// Illustration attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventImage {
    /// Full Moon.
    FullMoon,
    /// New Moon.
    NewMoon,
    /// Any solar eclipse.
    SolarEclipse,
    /// Any lunar eclipse.
    LunarEclipse,
    /// Equinoxes, solstices, perihelion, aphelion.
    Sun,
    /// Mercury.
    Mercury,
    /// Venus.
    Venus,
    /// Mars.
    Mars,
    /// Jupiter.
    Jupiter,
    /// Saturn.
    Saturn,
    /// Uranus.
    Uranus,
    /// Neptune.
    Neptune,
}

const SUN_WORDS: [&str; 4] = ["equinox", "solstice", "perihelion", "aphelion"];

const PLANETS: [(&str, EventImage); 7] = [
    ("mercury", EventImage::Mercury),
    ("venus", EventImage::Venus),
    ("mars", EventImage::Mars),
    ("jupiter", EventImage::Jupiter),
    ("saturn", EventImage::Saturn),
    ("uranus", EventImage::Uranus),
    ("neptune", EventImage::Neptune),
];

impl EventImage {
    /// Picks the illustration for `event`, if any rule matches.
    pub fn resolve(event: &Event) -> Option<Self> {
        let title = event.title().to_lowercase();
        let kind = event.kind().as_str().to_lowercase();

        if title.contains("full moon") {
            return Some(EventImage::FullMoon);
        }
        if title.contains("new moon") {
            return Some(EventImage::NewMoon);
        }
        if kind.contains("solar-eclipse") {
            return Some(EventImage::SolarEclipse);
        }
        if kind.contains("lunar-eclipse") {
            return Some(EventImage::LunarEclipse);
        }
        if SUN_WORDS.iter().any(|w| title.contains(w)) {
            return Some(EventImage::Sun);
        }
        PLANETS
            .iter()
            .find(|(name, _)| title.contains(name))
            .map(|(_, image)| *image)
    }

    /// Asset file name of the illustration.
    pub fn asset(&self) -> &'static str {
        match self {
            EventImage::FullMoon => "FullMoon_cal.png",
            EventImage::NewMoon => "NewMoon_cal.png",
            EventImage::SolarEclipse => "SolarEcl_cal.png",
            EventImage::LunarEclipse => "LunarEcl_cal.png",
            EventImage::Sun => "SUN_cal.png",
            EventImage::Mercury => "mercury_cal.png",
            EventImage::Venus => "venus_cal.png",
            EventImage::Mars => "mars_cal.png",
            EventImage::Jupiter => "jupiter_cal.png",
            EventImage::Saturn => "saturn_cal.png",
            EventImage::Uranus => "uranus_cal.png",
            EventImage::Neptune => "neptune_cal.png",
        }
    }

    /// Short label for text renderings.
    pub fn label(&self) -> &'static str {
        match self {
            EventImage::FullMoon => "full moon",
            EventImage::NewMoon => "new moon",
            EventImage::SolarEclipse => "solar eclipse",
            EventImage::LunarEclipse => "lunar eclipse",
            EventImage::Sun => "sun",
            EventImage::Mercury => "mercury",
            EventImage::Venus => "venus",
            EventImage::Mars => "mars",
            EventImage::Jupiter => "jupiter",
            EventImage::Saturn => "saturn",
            EventImage::Uranus => "uranus",
            EventImage::Neptune => "neptune",
        }
    }
}

impl fmt::Display for EventImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Most pictures a single day cell shows.
pub const MAX_CELL_IMAGES: usize = 2;

/// Distinct illustrations of a day's events in first-seen order, capped at
/// `MAX_CELL_IMAGES`.
pub fn day_images<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<EventImage> {
    let mut images: Vec<EventImage> = Vec::new();
    for image in events.into_iter().filter_map(EventImage::resolve) {
        if !images.contains(&image) {
            images.push(image);
        }
    }
    images.truncate(MAX_CELL_IMAGES);
    images
}

/// Moon icon drawn in a day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoonGlyph {
    /// Empty ring.
    New,
    /// Bright disc.
    Full,
    /// Half-lit disc for every other phase.
    Partial,
}

impl MoonGlyph {
    /// Glyph for a phase name. Unknown names get `Partial`.
    pub fn from_phase(phase: &str) -> Self {
        let phase = phase.to_lowercase();
        if phase.contains("new") {
            MoonGlyph::New
        } else if phase.contains("full") {
            MoonGlyph::Full
        } else {
            MoonGlyph::Partial
        }
    }

    /// Glyph of the first moon-phase event among `events`.
    pub fn for_day<'a>(events: impl IntoIterator<Item = &'a Event>) -> Option<Self> {
        events
            .into_iter()
            .find(|e| e.kind() == &EventKind::MoonPhase)
            .map(|e| MoonGlyph::from_phase(e.title()))
    }

    /// Terminal symbol.
    pub fn symbol(&self) -> char {
        match self {
            MoonGlyph::New => '○',
            MoonGlyph::Full => '●',
            MoonGlyph::Partial => '◐',
        }
    }
}
