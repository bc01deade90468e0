//! `UsnoClient` and the full aggregator against a local HTTP server speaking
//! the USNO payload shapes.

use chrono::NaiveDate;
use lib_skycal::aggregate::EventAggregator;
use lib_skycal::sources::solar_eclipses::visibility_path;
use lib_skycal::sources::{
    EventCatalog, FeedError, FeedSource, Observer, SourceSettings, UsnoClient, moon_phases, seasons, solar_eclipses,
};
use project_tests::serve;
use std::collections::HashMap;

fn settings(base_url: String) -> SourceSettings {
    SourceSettings {
        base_url,
        timeout_secs: 5,
        ..SourceSettings::default()
    }
}

fn usno_routes() -> HashMap<String, (u16, String)> {
    let observer = Observer::default();
    let hidden = NaiveDate::from_ymd_opt(2026, 2, 17).unwrap();
    let visible = NaiveDate::from_ymd_opt(2026, 8, 12).unwrap();

    HashMap::from([
        (
            moon_phases::feed_path(2026),
            (
                200,
                r#"{"apiversion":"4.0.1","numphases":2,"phasedata":[
                    {"day":3,"month":1,"phase":"Full Moon","time":"10:03","year":2026},
                    {"day":18,"month":1,"phase":"New Moon","time":"19:52","year":2026}]}"#
                    .to_string(),
            ),
        ),
        (
            seasons::feed_path(2026),
            (
                200,
                r#"{"apiversion":"4.0.1","data":[
                    {"day":3,"month":1,"phenom":"Perihelion","time":"17:15","year":2026},
                    {"day":20,"month":3,"phenom":"Equinox","time":"14:46","year":2026}]}"#
                    .to_string(),
            ),
        ),
        (
            solar_eclipses::feed_path(2026),
            (
                200,
                r#"{"apiversion":"4.0.1","eclipses_in_year":[
                    {"day":17,"event":"Annular Solar Eclipse of 2026 February 17","month":2,"year":2026},
                    {"day":12,"event":"Total Solar Eclipse of 2026 August 12","month":8,"year":2026}]}"#
                    .to_string(),
            ),
        ),
        (
            visibility_path(hidden, &observer),
            (
                400,
                r#"{"error":"The solar eclipse of 2026-02-17 is not visible from this location."}"#.to_string(),
            ),
        ),
        (
            visibility_path(visible, &observer),
            (200, r#"{"description":"Sunset eclipse, Sun below horizon at maximum."}"#.to_string()),
        ),
    ])
}

#[tokio::test]
async fn client_returns_json_and_reports_http_errors() {
    let base = serve(usno_routes()).await.unwrap();
    let client = UsnoClient::new(&settings(base)).unwrap();

    let body = client.get_json(&seasons::feed_path(2026)).await.unwrap();
    assert_eq!(body["data"][0]["phenom"], "Perihelion");

    match client.get_json("moon/phases/year?year=1700").await {
        Err(FeedError::Http { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.unwrap_or_default().contains("not found"));
        }
        other => panic!("expected an HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn aggregator_over_http_merges_every_source() {
    let base = serve(usno_routes()).await.unwrap();
    let aggregator = EventAggregator::usno_with_catalog(&settings(base), EventCatalog::bundled().unwrap()).unwrap();

    let events = aggregator.get_events(2026).await;

    let first_two: Vec<(&str, &str)> = events.iter().take(2).map(|e| (e.date(), e.title())).collect();
    assert_eq!(first_two, vec![("2026-01-03", "Full Moon"), ("2026-01-03", "Perihelion")]);

    let eclipses: Vec<&str> = events
        .iter()
        .filter(|e| e.title() == solar_eclipses::TITLE)
        .map(|e| e.description())
        .collect();
    assert_eq!(eclipses.len(), 2);
    assert!(eclipses[0].ends_with("Note: Not visible from your location (26.4669, 73.1147)."));
    assert!(eclipses[1].ends_with("Local visibility: Sunset eclipse, Sun below horizon at maximum."));

    assert!(events.iter().any(|e| e.date() == "2026-03-03" && e.title() == "Total Lunar Eclipse"));
    assert!(events.windows(2).all(|w| w[0].date() <= w[1].date()));
}

#[tokio::test]
async fn unreachable_service_leaves_only_the_catalog() {
    // Nothing listens on the discard port of localhost.
    let aggregator = EventAggregator::usno_with_catalog(
        &settings("http://127.0.0.1:9/api/".to_string()),
        EventCatalog::bundled().unwrap(),
    )
    .unwrap();

    let events = aggregator.get_events(2026).await;

    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.kind().as_str() == "lunar-eclipse" || e.kind().as_str() == "planet-event"));
}
