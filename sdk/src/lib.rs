//! StoryMap SDK
//!
//! Shared data model for StoryMap components. The engine produces these
//! records and the presentation bindings (map and card views) consume them.

/// Error types and handling
pub mod errors;

/// Location queries and coordinates
pub mod location;

/// Normalized records and composite results
pub mod types;

// Re-export commonly used types
pub use errors::{EngineError, StoryMapErrorExt};
pub use location::{Coordinates, LocationQuery, AUSTRALIA_CENTROID, DEFAULT_LOCATION_NAME};
pub use types::{
    ApiUsage, ClimateEventCandidate, ClimateEventRecord, ClimateEventType, CulturalInsights,
    CulturalRecommendations, DataSource, InsightSection, InsightsMetadata, LegendCounts,
    LocationClimate, LocationStory, LocationSummary, MapDataset, NarrativeRecord, NormalizedRecord,
    ProviderState, ProviderStatus, RecommendationRecord, Severity, StoryCollection,
    StoryDataContext, WeatherRecord,
};
