//! Normalized records and composite results
//!
//! Every record carries a [`DataSource`] so presentation can tell live
//! provider data apart from synthetic fallback content.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::location::Coordinates;

/// Provenance tag carried by every record.
///
/// Serialized as a plain string: the live provider name (for example
/// `"Tavily API"`) or `"Fallback"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataSource {
    /// Data produced by one or more live providers
    Live(String),

    /// Hardcoded fallback content
    Fallback,
}

impl DataSource {
    pub const FALLBACK_LABEL: &'static str = "Fallback";

    /// Tag data produced by a live provider
    pub fn live(provider: impl Into<String>) -> Self {
        Self::Live(provider.into())
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Live(provider) => provider,
            Self::Fallback => Self::FALLBACK_LABEL,
        }
    }
}

impl From<String> for DataSource {
    fn from(label: String) -> Self {
        if label == Self::FALLBACK_LABEL {
            Self::Fallback
        } else {
            Self::Live(label)
        }
    }
}

impl From<DataSource> for String {
    fn from(source: DataSource) -> Self {
        match source {
            DataSource::Live(provider) => provider,
            DataSource::Fallback => DataSource::FALLBACK_LABEL.to_string(),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A themed narrative about a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRecord {
    /// Position within a multi-story collection (1-based)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub title: String,
    pub content: String,
    pub theme: String,
    pub location: String,
    pub data_source: DataSource,
}

/// A cultural recommendation (music, art venue, dish, event, film, book)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub name: String,
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub data_source: DataSource,
}

/// Kind of climate event shown on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateEventType {
    Bushfire,
    Flood,
    Drought,
}

impl ClimateEventType {
    pub const ALL: [ClimateEventType; 3] = [Self::Bushfire, Self::Flood, Self::Drought];
}

impl fmt::Display for ClimateEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bushfire => write!(f, "Bushfire"),
            Self::Flood => write!(f, "Flood"),
            Self::Drought => write!(f, "Drought"),
        }
    }
}

/// Severity label of a climate event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Extreme,
    High,
    Major,
    Moderate,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extreme => write!(f, "Extreme"),
            Self::High => write!(f, "High"),
            Self::Major => write!(f, "Major"),
            Self::Moderate => write!(f, "Moderate"),
        }
    }
}

/// A climate event with validated coordinates, ready for map rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateEventRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClimateEventType,
    pub location: String,
    pub year: i32,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub coordinates: Coordinates,
    pub data_source: DataSource,
}

/// A climate event whose coordinates have not been checked yet.
///
/// Live sources hand these over; only [`ClimateEventCandidate::validate`]
/// turns them into renderable [`ClimateEventRecord`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateEventCandidate {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ClimateEventType,
    pub location: String,
    pub year: i32,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    #[serde(default)]
    pub coordinates: Option<serde_json::Value>,
    pub data_source: DataSource,
}

impl ClimateEventCandidate {
    /// Keep the event only if it has exactly two numeric coordinates
    pub fn validate(self) -> Option<ClimateEventRecord> {
        let coordinates = Coordinates::from_value(self.coordinates.as_ref()?)?;
        Some(ClimateEventRecord {
            id: self.id,
            kind: self.kind,
            location: self.location,
            year: self.year,
            severity: self.severity,
            description: self.description,
            impact: self.impact,
            coordinates,
            data_source: self.data_source,
        })
    }
}

impl From<ClimateEventRecord> for ClimateEventCandidate {
    fn from(record: ClimateEventRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            location: record.location,
            year: record.year,
            severity: record.severity,
            description: record.description,
            impact: record.impact,
            coordinates: Some(record.coordinates.to_value()),
            data_source: record.data_source,
        }
    }
}

/// Current weather at a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherRecord {
    pub location: String,
    /// Rounded to whole degrees
    pub temperature: i32,
    pub description: String,
    pub humidity: u8,
    pub wind_speed: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "source")]
    pub data_source: DataSource,
}

/// Union of every record kind the engine hands to presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NormalizedRecord {
    Narrative(NarrativeRecord),
    Recommendation(RecommendationRecord),
    ClimateEvent(ClimateEventRecord),
    Weather(WeatherRecord),
}

impl NormalizedRecord {
    pub fn data_source(&self) -> &DataSource {
        match self {
            Self::Narrative(r) => &r.data_source,
            Self::Recommendation(r) => &r.data_source,
            Self::ClimateEvent(r) => &r.data_source,
            Self::Weather(r) => &r.data_source,
        }
    }
}

/// Result of a location search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationSummary {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    pub region: String,
    pub data_source: DataSource,
}

/// Short heritage story shown on a location card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationStory {
    pub title: String,
    pub content: String,
    pub cultural_insights: Vec<String>,
    pub data_source: DataSource,
}

/// Which providers contributed to a story collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUsage {
    pub search: bool,
    pub text_generation: bool,
}

/// Summary of a multi-theme story collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryDataContext {
    pub location: String,
    pub total_stories: usize,
    pub themes: Vec<String>,
    pub data_sources: Vec<DataSource>,
    pub api_usage: ApiUsage,
}

/// Several themed narratives for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryCollection {
    pub stories: Vec<NarrativeRecord>,
    pub data_context: StoryDataContext,
}

/// One tab of the cultural insights view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightSection {
    pub title: String,
    pub summary: String,
    pub items: Vec<RecommendationRecord>,
    pub data_source: DataSource,
}

/// Whether a provider contributed live data to a composite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProviderState {
    Active,
    Fallback,
}

/// Per-provider status of a cultural insights request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    pub recommendation: ProviderState,
    pub search: ProviderState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsMetadata {
    pub location: String,
    /// RFC 3339 timestamp
    pub last_updated: String,
    pub total_items: usize,
    pub provider_status: ProviderStatus,
}

/// Composite "cultural insights" view: music, art, food and events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalInsights {
    pub location: String,
    pub music: InsightSection,
    pub art: InsightSection,
    pub food: InsightSection,
    pub events: InsightSection,
    pub metadata: InsightsMetadata,
}

impl CulturalInsights {
    /// Sections in display order
    pub fn sections(&self) -> [&InsightSection; 4] {
        [&self.music, &self.art, &self.food, &self.events]
    }
}

/// Music, film and book recommendations for a location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalRecommendations {
    pub location: String,
    pub music: Vec<RecommendationRecord>,
    pub movies: Vec<RecommendationRecord>,
    pub books: Vec<RecommendationRecord>,
    pub data_source: DataSource,
}

/// Weather and climate events for the selected location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationClimate {
    pub location: String,
    pub weather: WeatherRecord,
    pub events: Vec<ClimateEventCandidate>,
}

/// Per-type counts for the map legend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendCounts {
    pub bushfire: usize,
    pub flood: usize,
    pub drought: usize,
    pub total: usize,
}

impl LegendCounts {
    pub fn count(&self, kind: ClimateEventType) -> usize {
        match kind {
            ClimateEventType::Bushfire => self.bushfire,
            ClimateEventType::Flood => self.flood,
            ClimateEventType::Drought => self.drought,
        }
    }
}

/// Events ready for the map, with legend counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDataset {
    pub events: Vec<ClimateEventRecord>,
    pub legend: LegendCounts,
}

impl MapDataset {
    /// Number of events sharing the same `(location, type)` pair, shown in
    /// the marker popup
    pub fn frequency(&self, location: &str, kind: ClimateEventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.location == location && e.kind == kind)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate(coordinates: Option<serde_json::Value>) -> ClimateEventCandidate {
        ClimateEventCandidate {
            id: "loc-1".into(),
            kind: ClimateEventType::Flood,
            location: "Lismore".into(),
            year: 2022,
            severity: Severity::Moderate,
            description: "Flooding".into(),
            impact: "Local community impact".into(),
            coordinates,
            data_source: DataSource::live("Tavily API"),
        }
    }

    #[test]
    fn test_data_source_round_trip() {
        let json = serde_json::to_value(DataSource::Fallback).unwrap();
        assert_eq!(json, json!("Fallback"));

        let live: DataSource = serde_json::from_value(json!("Groq API")).unwrap();
        assert_eq!(live, DataSource::live("Groq API"));
        assert!(live.is_live());

        let fallback: DataSource = serde_json::from_value(json!("Fallback")).unwrap();
        assert!(fallback.is_fallback());
    }

    #[test]
    fn test_candidate_validation() {
        assert!(candidate(Some(json!([-28.8142, 153.2781]))).validate().is_some());
        assert!(candidate(Some(json!(["a", 1]))).validate().is_none());
        assert!(candidate(None).validate().is_none());
    }

    #[test]
    fn test_climate_event_serializes_type_field() {
        let record = candidate(Some(json!([-28.8, 153.2]))).validate().unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], json!("Flood"));
        assert_eq!(json["dataSource"], json!("Tavily API"));
        assert_eq!(json["coordinates"], json!([-28.8, 153.2]));
    }

    #[test]
    fn test_weather_uses_source_key() {
        let weather = WeatherRecord {
            location: "Perth".into(),
            temperature: 22,
            description: "Clear sky".into(),
            humidity: 65,
            wind_speed: 5.0,
            icon: None,
            data_source: DataSource::Fallback,
        };
        let json = serde_json::to_value(&weather).unwrap();
        assert_eq!(json["source"], json!("Fallback"));
        assert_eq!(json["windSpeed"], json!(5.0));
        assert!(json.get("icon").is_none());
    }

    #[test]
    fn test_normalized_record_data_source() {
        let record = NormalizedRecord::Narrative(NarrativeRecord {
            id: None,
            title: "Tales from Perth".into(),
            content: "...".into(),
            theme: "natural landscape".into(),
            location: "Perth".into(),
            data_source: DataSource::Fallback,
        });
        assert!(record.data_source().is_fallback());
    }

    #[test]
    fn test_map_dataset_frequency() {
        let a = candidate(Some(json!([-28.8, 153.2]))).validate().unwrap();
        let mut b = a.clone();
        b.id = "loc-2".into();
        let mut c = a.clone();
        c.kind = ClimateEventType::Bushfire;

        let dataset = MapDataset {
            events: vec![a, b, c],
            legend: LegendCounts::default(),
        };
        assert_eq!(dataset.frequency("Lismore", ClimateEventType::Flood), 2);
        assert_eq!(dataset.frequency("Lismore", ClimateEventType::Bushfire), 1);
        assert_eq!(dataset.frequency("Lismore", ClimateEventType::Drought), 0);
    }
}
