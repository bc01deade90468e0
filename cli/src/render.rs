//! Terminal rendering of the calendar view model.

use colored::{ColoredString, Colorize};
use lib_skycal::calendar::{DayCell, DayDetail, IntensityTier, ListRow, MonthGrid, WEEKDAYS};
use std::fmt::Write;

const CELL_WIDTH: usize = 6;

/// Shown by the list view for a month without events.
pub const EMPTY_MONTH: &str = "NO MISSION LOGS DETECTED FOR THIS SECTOR.";

/// Month grid followed by the agenda of busy days.
pub fn month(grid: &MonthGrid<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.label.as_str().bold());

    let header: Vec<String> = WEEKDAYS.iter().map(|d| format!("{:<width$}", d, width = CELL_WIDTH)).collect();
    let _ = writeln!(out, "{}", header.concat().trim_end().dimmed());

    let mut column = 0;
    let mut line = " ".repeat(CELL_WIDTH * grid.leading_blanks as usize);
    column += grid.leading_blanks as usize;

    for cell in &grid.cells {
        line.push_str(&day_square(cell));
        column += 1;
        if column % 7 == 0 {
            let _ = writeln!(out, "{}", line.trim_end());
            line.clear();
        }
    }
    if !line.is_empty() {
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let busy: Vec<&DayCell<'_>> = grid.cells.iter().filter(|c| c.has_events()).collect();
    if !busy.is_empty() {
        out.push('\n');
    }
    for cell in busy {
        let glyph = cell.glyph.map(|g| g.symbol()).unwrap_or(' ');
        let mut titles = cell.titles.join(", ");
        if let Some(more) = cell.more_label() {
            titles = format!("{}, {}", titles, more.as_str().dimmed());
        }
        let images: Vec<&str> = cell.images.iter().map(|i| i.label()).collect();
        let _ = write!(out, "{:>2} {} {}", cell.day, glyph, titles);
        if !images.is_empty() {
            let _ = write!(out, " {}", format!("[{}]", images.join(", ")).as_str().dimmed());
        }
        out.push('\n');
    }
    out
}

fn day_square(cell: &DayCell<'_>) -> String {
    let marker = match (cell.glyph, cell.has_events()) {
        (Some(glyph), _) => glyph.symbol(),
        (None, true) => '*',
        (None, false) => ' ',
    };
    let text = format!("{:>2}{}", cell.day, marker);
    let padded = format!("{:<width$}", text, width = CELL_WIDTH);
    if cell.is_today {
        // Pad first so escape codes do not break the column width.
        format!("{}{}", text.as_str().reversed(), &padded[text.len()..])
    } else if cell.has_events() {
        format!("{}{}", text.as_str().bold(), &padded[text.len()..])
    } else {
        padded
    }
}

/// List view, one event per row.
pub fn list(label: &str, rows: &[ListRow<'_>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", label.bold());
    if rows.is_empty() {
        let _ = writeln!(out, "{}", EMPTY_MONTH.dimmed());
    }
    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {} {:>2}  {}  {}",
            index + 1,
            row.short_month,
            row.day,
            row.event.title().bold(),
            format!("[{}]", row.badge).as_str().cyan()
        );
        let _ = writeln!(out, "      {}", row.event.description());
    }
    out
}

/// Expanded view of a day or of one list row.
pub fn detail(detail: &DayDetail<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.header().as_str().bold().blue());
    for entry in &detail.entries {
        out.push('\n');
        let _ = writeln!(out, "{}", entry.event.title().bold());
        let _ = writeln!(out, "{}", entry.date_line.as_str().dimmed());
        let _ = write!(out, "{}", format!("[{}]", entry.badge).as_str().cyan());
        if let Some(intensity) = entry.event.intensity() {
            let _ = write!(out, " {}", tier_color(entry.tier, &format!("[{}]", intensity)));
        }
        if let Some(image) = entry.image {
            let _ = write!(out, " {}", image.asset().dimmed());
        }
        out.push('\n');
        let _ = writeln!(out, "{}", entry.event.description());
    }
    out
}

fn tier_color(tier: IntensityTier, text: &str) -> ColoredString {
    match tier {
        IntensityTier::Green => text.green(),
        IntensityTier::Yellow => text.yellow(),
        IntensityTier::Neutral => text.normal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lib_skycal::calendar::{CalendarView, MonthCursor};
    use lib_skycal::{Event, EventKind, Intensity};

    fn view() -> CalendarView {
        colored::control::set_override(false);
        let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
        let mut view = CalendarView::new(MonthCursor::new(2025, 7).unwrap());
        view.set_events(
            2025,
            vec![
                Event::new(day(10), "Full Moon", EventKind::MoonPhase, "Bright.", Some(Intensity::High)),
                Event::new(day(15), "Mars at Opposition", EventKind::PlanetEvent, "Red.", None),
            ],
        );
        view
    }

    #[test]
    fn grid_lists_busy_days() {
        let view = view();
        let out = month(&view.month_grid(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()));

        assert!(out.starts_with("JULY 2025\nSUN"));
        assert!(out.contains("10 ● Full Moon [full moon]"));
        assert!(out.contains("15   Mars at Opposition [mars]"));
    }

    #[test]
    fn list_shows_badges() {
        let view = view();
        let out = list("JULY 2025", &view.list_rows());
        assert!(out.contains("  1. JUL 10  Full Moon  [moon phase]"));
        assert!(out.contains("  2. JUL 15  Mars at Opposition  [planet event]"));
    }

    #[test]
    fn empty_month_reports_no_logs() {
        colored::control::set_override(false);
        let out = list("AUGUST 2025", &[]);
        assert_eq!(out, "AUGUST 2025\nNO MISSION LOGS DETECTED FOR THIS SECTOR.\n");
    }

    #[test]
    fn detail_has_header_and_badges() {
        let view = view();
        let out = detail(&view.day_detail(10).unwrap());
        assert!(out.starts_with("TRANSMISSION RECEIVED (1)"));
        assert!(out.contains("THU, JUL 10, 2025"));
        assert!(out.contains("[moon phase] [High] FullMoon_cal.png"));
    }
}
