//! # Calendar View Model
//!
//! Everything a calendar front end needs from the year's event sequence,
//! without any rendering: day bucketing, month filtering for the list view,
//! month navigation, the today marker, illustration and moon-glyph choice,
//! and the day detail.
//!
//! ## Contained Modules:
//!
//! - **`cursor`**: `MonthCursor`, the displayed month and its grid geometry.
//! - **`view`**: `CalendarView`, the state shared by the grid and the list.
//! - **`imagery`**: `EventImage` and `MoonGlyph` selection.
//! - **`detail`**: `DayDetail`, the expanded view of one day.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

/// Displayed month.
pub mod cursor;
/// Day detail entries and badge tiers.
pub mod detail;
/// Illustrations and moon glyphs.
pub mod imagery;
/// Grid and list state.
pub mod view;

pub use cursor::MonthCursor;
pub use detail::{DayDetail, DetailEntry, IntensityTier};
pub use imagery::{EventImage, MoonGlyph, day_images};
pub use view::{CalendarView, DayCell, ListRow, MonthGrid, ViewMode, WEEKDAYS};
