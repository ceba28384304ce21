use sdk::{DataSource, LocationQuery, LocationStory, LocationSummary};

use super::{race, Orchestrator};
use crate::adapters::{truncate_with_ellipsis, Provider, SearchDepth, SearchRequest};
use crate::fallback::{culture, locations};

impl Orchestrator {
    /// Resolve a free-text query to a known location.
    ///
    /// Coordinates always come from the lookup table. A live search result,
    /// when available, only replaces the description.
    pub async fn search_location(&self, query: &str) -> LocationSummary {
        let name = LocationQuery::new(query).display_name().to_string();
        let known = locations::best_match(query);

        tracing::info!("Searching location '{}' (matched {})", name, known.key);

        let timeout = Self::millis(self.settings.search.location_timeout_ms);
        let request = SearchRequest::new(
            format!("{} Australia location coordinates geography", name),
            timeout,
        );

        let live_description = race(
            "Location search",
            timeout,
            self.providers.search.search(&request),
        )
        .await
        .and_then(|outcome| {
            outcome
                .results
                .first()
                .and_then(|hit| hit.text())
                .map(|content| truncate_with_ellipsis(content, 200))
        });

        let (description, data_source) = match live_description {
            Some(description) => (description, DataSource::live(Provider::Search.label())),
            None => (known.description.to_string(), DataSource::Fallback),
        };

        LocationSummary {
            name,
            lat: known.coordinates.lat,
            lng: known.coordinates.lng,
            description,
            region: locations::REGION.to_string(),
            data_source,
        }
    }

    /// Short heritage story for the location card
    pub async fn location_story(&self, location: &str) -> LocationStory {
        let location = LocationQuery::new(location).display_name().to_string();
        let timeout = Self::millis(self.settings.search.location_timeout_ms);
        let request = SearchRequest::new(
            format!("{} Australia history culture Indigenous heritage story", location),
            timeout,
        )
        .depth(SearchDepth::Advanced)
        .max_results(5);

        let researched = race(
            "Location story",
            timeout,
            self.providers.search.search(&request),
        )
        .await
        .and_then(|outcome| outcome.best_text().map(|text| truncate_with_ellipsis(text, 500)));

        let title = format!("Stories from {}", location);

        match researched {
            Some(content) => LocationStory {
                title,
                content,
                cultural_insights: culture::RESEARCHED_STORY_INSIGHTS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                data_source: DataSource::live(Provider::Search.label()),
            },
            None => {
                tracing::debug!("Using fallback story for {}", location);
                LocationStory {
                    title,
                    content: culture::location_story(&location),
                    cultural_insights: culture::STORY_INSIGHTS
                        .iter()
                        .map(|s| s.to_string())
                        .collect(),
                    data_source: DataSource::Fallback,
                }
            }
        }
    }
}
