//! End-to-end runs of the aggregation pipeline into the calendar view, with
//! scripted feeds.

use chrono::NaiveDate;
use lib_skycal::aggregate::EventAggregator;
use lib_skycal::calendar::{CalendarView, MonthCursor};
use lib_skycal::events::without_quarter_phases;
use lib_skycal::sources::solar_eclipses::{BASE_DESCRIPTION, visibility_path};
use lib_skycal::sources::{EventCatalog, EventRepository, Observer, moon_phases, seasons, solar_eclipses};
use lib_skycal::{Event, EventKind};
use project_tests::ScriptedFeed;
use serde_json::json;
use std::io::Write;
use std::time::Duration;

fn june_2025() -> ScriptedFeed {
    ScriptedFeed::new()
        .json(
            moon_phases::feed_path(2025),
            json!({ "phasedata": [
                { "year": 2025, "month": 6, "day": 10, "phase": "Full Moon", "time": "07:44" }
            ]}),
        )
        .json(
            seasons::feed_path(2025),
            json!({ "data": [
                { "phenom": "Solstice", "year": 2025, "month": 6, "day": 20, "time": "02:42" }
            ]}),
        )
        .json(
            solar_eclipses::feed_path(2025),
            json!({ "eclipses_in_year": [
                { "year": 2025, "month": 6, "day": 25, "event": "Partial Solar Eclipse" }
            ]}),
        )
}

fn empty_catalog() -> EventCatalog {
    EventCatalog::from_events(Vec::new())
}

#[tokio::test]
async fn month_with_a_failed_visibility_lookup() {
    let aggregator = EventAggregator::new(june_2025(), empty_catalog(), Observer::default());
    let events = aggregator.get_events(2025).await;

    let summary: Vec<(&str, &str)> = events.iter().map(|e| (e.date(), e.title())).collect();
    assert_eq!(
        summary,
        vec![
            ("2025-06-10", "Full Moon"),
            ("2025-06-20", "June Solstice"),
            ("2025-06-25", "Solar Eclipse"),
        ]
    );
    assert_eq!(events[2].description(), BASE_DESCRIPTION);

    let mut view = CalendarView::new(MonthCursor::new(2025, 6).unwrap());
    assert!(view.set_events(2025, without_quarter_phases(events)));
    assert_eq!(view.list_rows().len(), 3);

    let grid = view.month_grid(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    let eclipse_day = &grid.cells[24];
    assert_eq!(eclipse_day.titles, vec!["Solar Eclipse"]);

    let detail = view.day_detail(25).unwrap();
    let text = detail.entries[0].event.description();
    assert!(!text.contains("Local visibility"));
    assert!(!text.contains("Not visible"));
}

#[tokio::test]
async fn visible_eclipse_is_enriched_end_to_end() {
    let observer = Observer::default();
    let date = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
    let feed = june_2025().json(
        visibility_path(date, &observer),
        json!({ "description": "Partial eclipse visible at sunrise." }),
    );

    let aggregator = EventAggregator::new(feed, empty_catalog(), observer);
    let events = aggregator.get_events(2025).await;

    let eclipse = events.iter().find(|e| e.kind() == &EventKind::SolarEclipse).unwrap();
    assert!(eclipse.description().ends_with(" Local visibility: Partial eclipse visible at sunrise."));
}

#[tokio::test]
async fn one_lookup_per_eclipse_runs_concurrently() {
    let observer = Observer::default();
    let first = NaiveDate::from_ymd_opt(2025, 3, 29).unwrap();
    let second = NaiveDate::from_ymd_opt(2025, 9, 21).unwrap();
    let slow = Duration::from_millis(300);

    let feed = ScriptedFeed::new()
        .json(
            solar_eclipses::feed_path(2025),
            json!({ "eclipses_in_year": [
                { "year": 2025, "month": 3, "day": 29 },
                { "year": 2025, "month": 9, "day": 21 }
            ]}),
        )
        .json(visibility_path(first, &observer), json!({ "description": "one" }))
        .json(visibility_path(second, &observer), json!({ "description": "two" }))
        .delayed(visibility_path(first, &observer), slow)
        .delayed(visibility_path(second, &observer), slow);

    let started = tokio::time::Instant::now();
    let events = solar_eclipses::fetch_solar_eclipses(&feed, 2025, &observer).await;
    let elapsed = started.elapsed();

    assert_eq!(events.len(), 2);
    assert!(events[0].description().ends_with("one"));
    assert!(events[1].description().ends_with("two"));
    assert!(elapsed < slow * 2, "lookups ran one after another: {:?}", elapsed);

    let lookups = feed.requests().iter().filter(|p| p.starts_with("eclipses/solar/date")).count();
    assert_eq!(lookups, 2);
}

#[tokio::test]
async fn only_the_failed_source_goes_missing() {
    let feed = june_2025().status(moon_phases::feed_path(2025), 500, Some("internal error"));
    let aggregator = EventAggregator::new(feed, EventCatalog::bundled().unwrap(), Observer::default());

    let events = aggregator.get_events(2025).await;

    assert!(events.iter().all(|e| e.kind() != &EventKind::MoonPhase));
    assert!(events.iter().any(|e| e.title() == "June Solstice"));
    assert!(events.iter().any(|e| e.kind() == &EventKind::SolarEclipse));
    assert!(events.iter().any(|e| e.kind() == &EventKind::LunarEclipse));
    assert!(events.windows(2).all(|w| w[0].date() <= w[1].date()));
}

#[tokio::test]
async fn catalog_events_share_days_without_dedup() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        "{}",
        json!([
            { "date": "2025-06-10", "title": "Full Moon", "type": "moon-phase", "description": "catalog copy" },
            { "date": "2024-06-10", "title": "Old", "type": "planet-event", "description": "" }
        ])
    )
    .unwrap();

    let catalog = EventCatalog::from_path(file.path()).unwrap();
    assert_eq!(catalog.events_for_year(2025).len(), 1);

    let aggregator = EventAggregator::new(june_2025(), catalog, Observer::default());
    let events = aggregator.get_events(2025).await;

    let same_day: Vec<&str> = events.iter().filter(|e| e.is_on("2025-06-10")).map(Event::description).collect();
    assert_eq!(same_day.len(), 2);
    assert_eq!(same_day[1], "catalog copy");
}

#[tokio::test]
async fn quarter_phases_reach_the_sequence_but_not_the_calendar() {
    let feed = june_2025().json(
        moon_phases::feed_path(2025),
        json!({ "phasedata": [
            { "year": 2025, "month": 6, "day": 3, "phase": "First Quarter", "time": "03:41" },
            { "year": 2025, "month": 6, "day": 11, "phase": "Full Moon", "time": "07:44" },
            { "year": 2025, "month": 6, "day": 18, "phase": "Last Quarter", "time": "19:19" },
            { "year": 2025, "month": 6, "day": 25, "phase": "New Moon", "time": "10:31" }
        ]}),
    );
    let aggregator = EventAggregator::new(feed, empty_catalog(), Observer::default());
    let events = aggregator.get_events(2025).await;
    assert_eq!(events.iter().filter(|e| e.kind() == &EventKind::MoonPhase).count(), 4);

    let shown = without_quarter_phases(events);
    let titles: Vec<&str> = shown.iter().map(Event::title).collect();
    assert_eq!(titles, vec!["Full Moon", "June Solstice", "New Moon", "Solar Eclipse"]);
}

#[test]
fn month_navigation_wraps_years() {
    let mut view = CalendarView::new(MonthCursor::new(2025, 1).unwrap());
    assert!(view.navigate(-1));
    assert_eq!((view.cursor().year(), view.cursor().month()), (2024, 12));

    let mut view = CalendarView::new(MonthCursor::new(2025, 12).unwrap());
    assert!(view.navigate(1));
    assert_eq!((view.cursor().year(), view.cursor().month()), (2026, 1));
}
