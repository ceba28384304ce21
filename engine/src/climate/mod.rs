//! Climate-Event Aggregator
//!
//! Turns search hits into climate event candidates and prepares the map
//! dataset: the historical events plus any live events, filtered down to
//! records with exactly two numeric coordinates, with legend counts.
//!
//! Historical and live events are never deduplicated; both are shown.

use regex::Regex;
use sdk::{
    ClimateEventCandidate, ClimateEventRecord, ClimateEventType, Coordinates, DataSource,
    LegendCounts, LocationQuery, MapDataset, Severity, AUSTRALIA_CENTROID, DEFAULT_LOCATION_NAME,
};
use std::sync::OnceLock;

use crate::adapters::{truncate_with_ellipsis, Provider, SearchHit};
use crate::fallback::locations;

/// Live events kept per location lookup
pub const MAX_LOCATION_EVENTS: usize = 8;

/// Live events kept from the national lookup
pub const MAX_NATIONAL_EVENTS: usize = 6;

const DEFAULT_EVENT_YEAR: i32 = 2023;

static YEAR_PATTERN: OnceLock<Regex> = OnceLock::new();

fn year_pattern() -> &'static Regex {
    YEAR_PATTERN.get_or_init(|| Regex::new(r"20(19|20|21|22|23|24)").expect("Invalid year pattern"))
}

/// Event type from a result title: "fire" wins over "flood", anything else
/// is a drought
pub fn classify(title: &str) -> ClimateEventType {
    let title = title.to_lowercase();
    if title.contains("fire") {
        ClimateEventType::Bushfire
    } else if title.contains("flood") {
        ClimateEventType::Flood
    } else {
        ClimateEventType::Drought
    }
}

/// First year between 2019 and 2024 mentioned in the text
pub fn extract_year(text: &str) -> Option<i32> {
    year_pattern()
        .find(text)
        .and_then(|m| m.as_str().parse().ok())
}

const STATES: [(&str, &str); 7] = [
    ("NSW", "sydney"),
    ("Victoria", "melbourne"),
    ("Queensland", "brisbane"),
    ("Western Australia", "perth"),
    ("South Australia", "adelaide"),
    ("Tasmania", "hobart"),
    ("Northern Territory", "darwin"),
];

/// First state named in the text, checked in a fixed order
pub fn extract_state(text: &str) -> Option<&'static str> {
    STATES
        .iter()
        .map(|(state, _)| *state)
        .find(|state| text.contains(state))
}

/// Coordinates of a state's capital city, or the centroid
pub fn state_coordinates(state: Option<&str>) -> Coordinates {
    state
        .and_then(|state| STATES.iter().find(|(name, _)| *name == state))
        .and_then(|(_, capital)| {
            locations::LOCATIONS
                .iter()
                .find(|location| location.key == *capital)
        })
        .map(|location| location.coordinates)
        .unwrap_or(AUSTRALIA_CENTROID)
}

/// Events for the selected location, one per search hit
pub fn location_events(query: &LocationQuery, hits: &[SearchHit]) -> Vec<ClimateEventCandidate> {
    let coordinates = query.coordinates();

    hits.iter()
        .take(MAX_LOCATION_EVENTS)
        .enumerate()
        .map(|(index, hit)| ClimateEventCandidate {
            id: format!("loc-{}", index + 1),
            kind: classify(hit.title.as_deref().unwrap_or_default()),
            location: query.display_name().to_string(),
            year: hit
                .text()
                .and_then(extract_year)
                .unwrap_or(DEFAULT_EVENT_YEAR),
            severity: Severity::Moderate,
            description: hit
                .text()
                .map(|content| truncate_with_ellipsis(content, 150))
                .unwrap_or_else(|| "Climate event".to_string()),
            impact: "Local community impact".to_string(),
            coordinates: Some(coordinates.to_value()),
            data_source: DataSource::live(Provider::Search.label()),
        })
        .collect()
}

/// Events from the national lookup, placed at the capital of the state
/// named in each title
pub fn national_events(hits: &[SearchHit]) -> Vec<ClimateEventCandidate> {
    hits.iter()
        .take(MAX_NATIONAL_EVENTS)
        .enumerate()
        .map(|(index, hit)| {
            let title = hit.title.as_deref().unwrap_or_default();
            let state = extract_state(title);
            ClimateEventCandidate {
                id: format!("live-{}", index + 1),
                kind: classify(title),
                location: state.unwrap_or(DEFAULT_LOCATION_NAME).to_string(),
                year: hit
                    .text()
                    .and_then(extract_year)
                    .unwrap_or(DEFAULT_EVENT_YEAR),
                severity: Severity::High,
                description: hit
                    .text()
                    .map(|content| truncate_with_ellipsis(content, 100))
                    .unwrap_or_else(|| "Climate event".to_string()),
                impact: "Community and environmental impact".to_string(),
                coordinates: Some(state_coordinates(state).to_value()),
                data_source: DataSource::live(Provider::Search.label()),
            }
        })
        .collect()
}

/// Keep only events with exactly two numeric coordinates
pub fn valid_events<I>(candidates: I) -> Vec<ClimateEventRecord>
where
    I: IntoIterator<Item = ClimateEventCandidate>,
{
    let mut dropped = 0usize;
    let events: Vec<_> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let id = candidate.id.clone();
            let record = candidate.validate();
            if record.is_none() {
                tracing::debug!("Excluding climate event {} with invalid coordinates", id);
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        tracing::info!("Excluded {} climate events from the map", dropped);
    }

    events
}

/// Per-type counts
pub fn legend(events: &[ClimateEventRecord]) -> LegendCounts {
    let mut counts = LegendCounts::default();
    for event in events {
        match event.kind {
            ClimateEventType::Bushfire => counts.bushfire += 1,
            ClimateEventType::Flood => counts.flood += 1,
            ClimateEventType::Drought => counts.drought += 1,
        }
        counts.total += 1;
    }
    counts
}

/// Merge historical and live events and prepare them for the map.
///
/// Historical events always come first and are never replaced.
pub fn map_dataset<I>(historical: Vec<ClimateEventRecord>, live: I) -> MapDataset
where
    I: IntoIterator<Item = ClimateEventCandidate>,
{
    let candidates = historical
        .into_iter()
        .map(ClimateEventCandidate::from)
        .chain(live);

    let events = valid_events(candidates);
    let legend = legend(&events);

    MapDataset { events, legend }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(title: &str, content: &str) -> SearchHit {
        SearchHit {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            url: None,
        }
    }

    fn candidate(id: &str, coordinates: Option<serde_json::Value>) -> ClimateEventCandidate {
        ClimateEventCandidate {
            id: id.to_string(),
            kind: ClimateEventType::Flood,
            location: "Test".to_string(),
            year: 2022,
            severity: Severity::Moderate,
            description: String::new(),
            impact: String::new(),
            coordinates,
            data_source: DataSource::Fallback,
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("Bushfire season"), ClimateEventType::Bushfire);
        assert_eq!(classify("FLOODS in Lismore"), ClimateEventType::Flood);
        assert_eq!(classify("Firestorm and flood"), ClimateEventType::Bushfire);
        assert_eq!(classify("Heatwave"), ClimateEventType::Drought);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("In March 2022 the river rose"), Some(2022));
        assert_eq!(extract_year("The 2011 floods"), None);
        assert_eq!(extract_year("2018 then 2024"), Some(2024));
    }

    #[test]
    fn test_state_coordinates() {
        assert_eq!(extract_state("Floods hit Queensland again"), Some("Queensland"));
        assert_eq!(
            state_coordinates(Some("Queensland")),
            Coordinates::new(-27.4698, 153.0251)
        );
        assert_eq!(state_coordinates(None), AUSTRALIA_CENTROID);
    }

    #[test]
    fn test_location_events() {
        let query = LocationQuery::new("Lismore").with_coordinates(-28.81, 153.28);
        let hits: Vec<_> = (0..10)
            .map(|i| hit("Flood warning", &format!("Report {} from 2022", i)))
            .collect();

        let events = location_events(&query, &hits);
        assert_eq!(events.len(), MAX_LOCATION_EVENTS);
        assert_eq!(events[0].id, "loc-1");
        assert_eq!(events[0].kind, ClimateEventType::Flood);
        assert_eq!(events[0].year, 2022);
        assert_eq!(events[0].coordinates, Some(json!([-28.81, 153.28])));
    }

    #[test]
    fn test_national_events_default_location() {
        let events = national_events(&[hit("Drought outlook", "Dry year ahead")]);
        assert_eq!(events[0].id, "live-1");
        assert_eq!(events[0].location, "Australia");
        assert_eq!(events[0].year, 2023);
        assert_eq!(events[0].coordinates, Some(json!([-25.2744, 133.7751])));
    }

    #[test]
    fn test_invalid_coordinates_are_excluded() {
        let events = valid_events(vec![
            candidate("ok", Some(json!([-33.0, 151.0]))),
            candidate("string", Some(json!(["a", 1]))),
            candidate("short", Some(json!([1.0]))),
            candidate("long", Some(json!([1.0, 2.0, 3.0]))),
            candidate("null", Some(json!(null))),
            candidate("missing", None),
        ]);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "ok");
    }

    #[test]
    fn test_map_dataset_keeps_historical() {
        let historical = crate::fallback::climate::historical_events();
        let dataset = map_dataset(
            historical,
            vec![
                candidate("loc-1", Some(json!([-28.8, 153.2]))),
                candidate("loc-2", Some(json!(["x", "y"]))),
            ],
        );
        assert_eq!(dataset.events.len(), 16);
        assert_eq!(dataset.legend.total, 16);
        assert_eq!(dataset.legend.flood, 6);
        assert_eq!(dataset.events[0].id, "1");
    }
}
