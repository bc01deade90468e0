//! Day detail: every event of one day, ready for display.

use crate::calendar::imagery::EventImage;
use crate::events::{Event, Intensity};

/// Colour tier of an intensity badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityTier {
    /// High.
    Green,
    /// Medium.
    Yellow,
    /// Low or absent.
    Neutral,
}

impl From<Option<Intensity>> for IntensityTier {
    fn from(value: Option<Intensity>) -> Self {
        match value {
            Some(Intensity::High) => IntensityTier::Green,
            Some(Intensity::Medium) => IntensityTier::Yellow,
            Some(Intensity::Low) | None => IntensityTier::Neutral,
        }
    }
}

/// One event inside a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailEntry<'a> {
    /// The event itself.
    pub event: &'a Event,
    /// Upper-case date line, e.g. `TUE, JUL 15, 2025`.
    pub date_line: String,
    /// Kind badge, e.g. `solar eclipse`.
    pub badge: String,
    /// Badge colour.
    pub tier: IntensityTier,
    /// Illustration, if one matches.
    pub image: Option<EventImage>,
}

impl<'a> DetailEntry<'a> {
    /// Builds the display entry of `event`.
    pub fn new(event: &'a Event) -> Self {
        Self {
            event,
            date_line: date_line(event),
            badge: event.kind().badge(),
            tier: IntensityTier::from(event.intensity()),
            image: EventImage::resolve(event),
        }
    }
}

/// # Day Detail
///
/// What opens when a day (or a single list row) is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDetail<'a> {
    /// One entry per event, in sequence order.
    pub entries: Vec<DetailEntry<'a>>,
}

impl<'a> DayDetail<'a> {
    /// Detail over `events`; `None` when there is nothing to show.
    pub fn of(events: impl IntoIterator<Item = &'a Event>) -> Option<Self> {
        let entries: Vec<DetailEntry<'a>> = events.into_iter().map(DetailEntry::new).collect();
        (!entries.is_empty()).then_some(Self { entries })
    }

    /// Number of events shown.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no events are shown.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Header line, e.g. `TRANSMISSION RECEIVED (2)`.
    pub fn header(&self) -> String {
        format!("TRANSMISSION RECEIVED ({})", self.entries.len())
    }
}

fn date_line(event: &Event) -> String {
    event
        .naive_date()
        .format("%a, %b %-d, %Y")
        .to_string()
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use chrono::NaiveDate;

    fn event(intensity: Option<Intensity>) -> Event {
        let date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();
        Event::new(date, "Full Moon", EventKind::MoonPhase, "Bright.", intensity)
    }

    #[test]
    fn tiers_follow_intensity() {
        assert_eq!(IntensityTier::from(Some(Intensity::High)), IntensityTier::Green);
        assert_eq!(IntensityTier::from(Some(Intensity::Medium)), IntensityTier::Yellow);
        assert_eq!(IntensityTier::from(Some(Intensity::Low)), IntensityTier::Neutral);
        assert_eq!(IntensityTier::from(None), IntensityTier::Neutral);
    }

    #[test]
    fn entry_formats_date_and_badge() {
        let event = event(Some(Intensity::High));
        let entry = DetailEntry::new(&event);

        assert_eq!(entry.date_line, "TUE, JUL 15, 2025");
        assert_eq!(entry.badge, "moon phase");
        assert_eq!(entry.image, Some(EventImage::FullMoon));
    }

    #[test]
    fn header_counts_events() {
        let events = [event(None), event(Some(Intensity::Low))];
        let detail = DayDetail::of(&events).unwrap();

        assert_eq!(detail.len(), 2);
        assert_eq!(detail.header(), "TRANSMISSION RECEIVED (2)");
    }

    #[test]
    fn empty_day_has_no_detail() {
        assert!(DayDetail::of(std::iter::empty()).is_none());
    }
}
