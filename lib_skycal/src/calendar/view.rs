use crate::calendar::cursor::MonthCursor;
use crate::calendar::detail::DayDetail;
use crate::calendar::imagery::{EventImage, MoonGlyph, day_images};
use crate::events::Event;
use chrono::{Datelike, NaiveDate};

/// Column headers of the month grid, Sunday first.
pub const WEEKDAYS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

/// Most titles a grid cell lists before summarising the rest.
pub const MAX_CELL_TITLES: usize = 3;

/// Which of the two presentations is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Month grid.
    #[default]
    Month,
    /// Chronological list of the month's events.
    List,
}

impl ViewMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Month => ViewMode::List,
            ViewMode::List => ViewMode::Month,
        }
    }
}

/// One day square of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell<'a> {
    /// Day of month.
    pub day: u32,
    /// True on the current civil date.
    pub is_today: bool,
    /// Up to `MAX_CELL_TITLES` titles.
    pub titles: Vec<&'a str>,
    /// Events beyond the listed titles.
    pub overflow: usize,
    /// Moon icon, when the day has a moon phase.
    pub glyph: Option<MoonGlyph>,
    /// Distinct illustrations, at most two.
    pub images: Vec<EventImage>,
}

impl DayCell<'_> {
    /// True when the day has any event.
    pub fn has_events(&self) -> bool {
        !self.titles.is_empty()
    }

    /// `+N more` when titles were cut.
    pub fn more_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

/// The month grid as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid<'a> {
    /// Header, e.g. `JULY 2025`.
    pub label: String,
    /// Empty cells before day 1.
    pub leading_blanks: u32,
    /// One cell per day of the month.
    pub cells: Vec<DayCell<'a>>,
}

/// One line of the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow<'a> {
    /// The event.
    pub event: &'a Event,
    /// Upper-case short month, e.g. `JUL`.
    pub short_month: String,
    /// Day of month.
    pub day: u32,
    /// Kind badge.
    pub badge: String,
}

/// # Calendar View
///
/// Holds the displayed month, the active mode and the events of the
/// displayed year. Both modes read the same events; switching modes or
/// moving within a year never needs new data.
#[derive(Debug, Clone)]
pub struct CalendarView {
    cursor: MonthCursor,
    mode: ViewMode,
    loaded_year: Option<i32>,
    events: Vec<Event>,
}

impl CalendarView {
    /// A view on `cursor` with no events loaded yet.
    pub fn new(cursor: MonthCursor) -> Self {
        Self {
            cursor,
            mode: ViewMode::default(),
            loaded_year: None,
            events: Vec::new(),
        }
    }

    /// Month shown.
    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    /// Active mode.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switches between grid and list.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Year whose events are held, if any.
    pub fn loaded_year(&self) -> Option<i32> {
        self.loaded_year
    }

    /// True when the displayed year's events are not held.
    pub fn needs_load(&self) -> bool {
        self.loaded_year != Some(self.cursor.year())
    }

    /// Installs the events of `year`. Ignored (returns false) when the view
    /// has moved to another year in the meantime.
    pub fn set_events(&mut self, year: i32, events: Vec<Event>) -> bool {
        if year != self.cursor.year() {
            return false;
        }
        self.loaded_year = Some(year);
        self.events = events;
        true
    }

    /// Moves by `delta` months. Returns true when the year changed, in which
    /// case the held events are dropped and a load is due.
    pub fn navigate(&mut self, delta: i32) -> bool {
        self.go_to(self.cursor.shifted(delta))
    }

    /// Jumps to `cursor`. Same return contract as `navigate`.
    pub fn go_to(&mut self, cursor: MonthCursor) -> bool {
        let year_changed = cursor.year() != self.cursor.year();
        self.cursor = cursor;
        if year_changed {
            self.loaded_year = None;
            self.events.clear();
        }
        year_changed
    }

    /// Every held event of the year.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Events on `day` of the displayed month.
    pub fn events_for_day(&self, day: u32) -> Vec<&Event> {
        match self.cursor.day_key(day) {
            Some(key) => self.events.iter().filter(|e| e.is_on(&key)).collect(),
            None => Vec::new(),
        }
    }

    /// Events of the displayed month, in sequence order.
    pub fn month_events(&self) -> Vec<&Event> {
        let prefix = self.cursor.prefix();
        self.events.iter().filter(|e| e.has_prefix(&prefix)).collect()
    }

    /// True when `day` of the displayed month is `today`.
    pub fn is_today(&self, day: u32, today: NaiveDate) -> bool {
        (self.cursor.year(), self.cursor.month(), day) == (today.year(), today.month(), today.day())
    }

    /// The month grid, with `today` marked.
    pub fn month_grid(&self, today: NaiveDate) -> MonthGrid<'_> {
        let cells = (1..=self.cursor.days_in_month())
            .map(|day| {
                let events = self.events_for_day(day);
                DayCell {
                    day,
                    is_today: self.is_today(day, today),
                    titles: events.iter().take(MAX_CELL_TITLES).map(|e| e.title()).collect(),
                    overflow: events.len().saturating_sub(MAX_CELL_TITLES),
                    glyph: MoonGlyph::for_day(events.iter().copied()),
                    images: day_images(events.iter().copied()),
                }
            })
            .collect();

        MonthGrid {
            label: self.cursor.label(),
            leading_blanks: self.cursor.leading_blanks(),
            cells,
        }
    }

    /// The list view rows of the displayed month.
    pub fn list_rows(&self) -> Vec<ListRow<'_>> {
        self.month_events()
            .into_iter()
            .map(|event| {
                let date = event.naive_date();
                ListRow {
                    event,
                    short_month: date.format("%b").to_string().to_uppercase(),
                    day: date.day(),
                    badge: event.kind().badge(),
                }
            })
            .collect()
    }

    /// Detail of every event on `day`; `None` for an empty day.
    pub fn day_detail(&self, day: u32) -> Option<DayDetail<'_>> {
        DayDetail::of(self.events_for_day(day))
    }

    /// Detail of the `index`-th list row alone.
    pub fn row_detail(&self, index: usize) -> Option<DayDetail<'_>> {
        self.month_events().get(index).and_then(|event| DayDetail::of([*event]))
    }
}
