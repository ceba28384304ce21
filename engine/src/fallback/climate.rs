//! Historical climate events and weather fallbacks

use sdk::{
    ClimateEventCandidate, ClimateEventRecord, ClimateEventType, Coordinates, DataSource,
    LocationQuery, Severity, WeatherRecord,
};

use ClimateEventType::{Bushfire, Drought, Flood};
use Severity::{Extreme, High, Major};

struct StaticEvent {
    kind: ClimateEventType,
    location: &'static str,
    year: i32,
    severity: Severity,
    description: &'static str,
    impact: &'static str,
    coordinates: Coordinates,
}

#[allow(clippy::too_many_arguments)]
const fn event(
    kind: ClimateEventType,
    location: &'static str,
    year: i32,
    severity: Severity,
    description: &'static str,
    impact: &'static str,
    lat: f64,
    lng: f64,
) -> StaticEvent {
    StaticEvent {
        kind,
        location,
        year,
        severity,
        description,
        impact,
        coordinates: Coordinates::new(lat, lng),
    }
}

const HISTORICAL: [StaticEvent; 15] = [
    event(
        Bushfire,
        "Black Summer - NSW",
        2020,
        Extreme,
        "Black Summer bushfires devastated NSW communities, burning 5.5 million hectares",
        "33 deaths, 3,000+ homes destroyed, 1 billion animals killed",
        -33.4569,
        150.7944,
    ),
    event(
        Bushfire,
        "East Gippsland - VIC",
        2020,
        Extreme,
        "East Gippsland fires destroyed 1.5 million hectares during Black Summer",
        "5 deaths, 300+ homes destroyed, massive wildlife losses",
        -37.5622,
        148.1847,
    ),
    event(
        Bushfire,
        "Ash Wednesday - SA/VIC",
        1983,
        Extreme,
        "Ash Wednesday fires were among Australia's worst natural disasters",
        "75 deaths, 2,545 homes destroyed, 210,000 hectares burned",
        -34.9285,
        138.8007,
    ),
    event(
        Bushfire,
        "Black Friday - VIC",
        1939,
        Extreme,
        "Black Friday fires burned 2 million hectares across Victoria",
        "71 deaths, entire towns destroyed, changed fire management forever",
        -37.0201,
        145.7781,
    ),
    event(
        Bushfire,
        "Canberra - ACT",
        2003,
        High,
        "Canberra bushfires reached the suburbs, unprecedented urban fire",
        "4 deaths, 500+ homes destroyed, $350M damage",
        -35.2809,
        149.1300,
    ),
    event(
        Flood,
        "Lismore - NSW",
        2022,
        Extreme,
        "Record-breaking floods devastated Northern NSW, highest ever recorded",
        "22 deaths, 25,000+ evacuated, $4.8B damage",
        -28.8142,
        153.2781,
    ),
    event(
        Flood,
        "Brisbane - QLD",
        2011,
        Extreme,
        "Queensland floods affected 78% of the state, worst in 120 years",
        "35 deaths, 20,000+ homes flooded, $2.38B damage",
        -27.4698,
        153.0251,
    ),
    event(
        Flood,
        "Townsville - QLD",
        2019,
        Major,
        "Monsoon flooding inundated Townsville, 1-in-500-year event",
        "3 deaths, 3,300+ homes damaged, mass evacuations",
        -19.2590,
        146.8169,
    ),
    event(
        Flood,
        "Katherine - NT",
        1998,
        Major,
        "Katherine River flooding, worst in recorded history",
        "1 death, 2,000+ evacuated, town underwater for weeks",
        -14.4669,
        132.2647,
    ),
    event(
        Flood,
        "Hunter Valley - NSW",
        2007,
        Major,
        "Pasha Bulker storm caused severe flooding across Hunter Valley",
        "11 deaths, 300+ homes flooded, $1.5B damage",
        -32.7335,
        151.5027,
    ),
    event(
        Drought,
        "Millennium Drought - Murray-Darling",
        2006,
        Extreme,
        "Millennium Drought (1997-2009) was Australia's worst recorded drought",
        "$9B agricultural losses, 41% drop in rice production, river systems collapsed",
        -34.0522,
        142.0251,
    ),
    event(
        Drought,
        "Federation Drought - Eastern Australia",
        1902,
        Extreme,
        "Federation Drought (1895-1903) devastated eastern Australia",
        "40% livestock losses, mass migration to cities, economic collapse",
        -33.8688,
        151.2093,
    ),
    event(
        Drought,
        "Central Queensland",
        2019,
        Extreme,
        "Extended drought conditions across Central Queensland grazing areas",
        "100% of QLD in drought, $8B agricultural losses, mass cattle deaths",
        -23.3382,
        150.5150,
    ),
    event(
        Drought,
        "Wheatbelt - WA",
        2010,
        High,
        "Severe drought affected Western Australian Wheatbelt region",
        "30% crop yield reduction, $2B losses, water restrictions",
        -31.0000,
        117.8833,
    ),
    event(
        Drought,
        "Big Dry - Southeast Australia",
        2002,
        Extreme,
        "The Big Dry affected southeast Australia for over a decade",
        "Water restrictions, $5B agricultural losses, ecological damage",
        -35.3075,
        149.1244,
    ),
];

/// The fixed set of historical events, ids `"1"` to `"15"`
pub fn historical_events() -> Vec<ClimateEventRecord> {
    HISTORICAL
        .iter()
        .enumerate()
        .map(|(index, event)| ClimateEventRecord {
            id: (index + 1).to_string(),
            kind: event.kind,
            location: event.location.to_string(),
            year: event.year,
            severity: event.severity,
            description: event.description.to_string(),
            impact: event.impact.to_string(),
            coordinates: event.coordinates,
            data_source: DataSource::Fallback,
        })
        .collect()
}

/// Mild default conditions
pub fn weather(query: &LocationQuery) -> WeatherRecord {
    WeatherRecord {
        location: query.display_name().to_string(),
        temperature: 22,
        description: "Clear sky".to_string(),
        humidity: 65,
        wind_speed: 5.0,
        icon: None,
        data_source: DataSource::Fallback,
    }
}

/// Placeholder event pinned at the query's coordinates
pub fn location_event(query: &LocationQuery) -> ClimateEventCandidate {
    let name = query.display_name();
    ClimateEventCandidate {
        id: "fallback-1".to_string(),
        kind: ClimateEventType::Bushfire,
        location: name.to_string(),
        year: 2020,
        severity: Severity::Moderate,
        description: format!("Historical bushfire events in {name} area"),
        impact: "Community and environmental impact".to_string(),
        coordinates: Some(query.coordinates().to_value()),
        data_source: DataSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk::AUSTRALIA_CENTROID;

    #[test]
    fn test_historical_events() {
        let events = historical_events();
        assert_eq!(events.len(), 15);
        assert_eq!(events[0].id, "1");
        assert_eq!(events[0].location, "Black Summer - NSW");
        assert_eq!(events[0].year, 2020);
        assert_eq!(events[14].id, "15");

        for kind in ClimateEventType::ALL {
            assert_eq!(events.iter().filter(|e| e.kind == kind).count(), 5);
        }
    }

    #[test]
    fn test_location_event_uses_centroid_without_coordinates() {
        let candidate = location_event(&LocationQuery::new("Broken Hill"));
        let record = candidate.validate().unwrap();
        assert_eq!(record.coordinates, AUSTRALIA_CENTROID);
        assert_eq!(record.description, "Historical bushfire events in Broken Hill area");
    }

    #[test]
    fn test_weather_fallback() {
        let weather = weather(&LocationQuery::new("Cairns"));
        assert_eq!(weather.temperature, 22);
        assert_eq!(weather.humidity, 65);
        assert!(weather.data_source.is_fallback());
    }
}
