use sdk::{ClimateEventCandidate, LocationClimate, LocationQuery, MapDataset};

use super::{race, Orchestrator};
use crate::adapters::{SearchDepth, SearchRequest};
use crate::climate;
use crate::fallback;

const NATIONAL_QUERY: &str = "Australia climate events bushfires floods droughts 2020 2021 2022 2023";

impl Orchestrator {
    /// Current weather and recent climate events for the selected location
    pub async fn location_climate(&self, query: &LocationQuery) -> LocationClimate {
        let location = query.display_name().to_string();
        let budget = self.budgets.climate_race();

        tracing::info!("Fetching climate data for {}", location);

        let request = SearchRequest::new(
            format!(
                "{} Australia climate events bushfires floods droughts history disasters",
                location
            ),
            Self::millis(self.settings.search.climate_timeout_ms),
        )
        .depth(SearchDepth::Advanced)
        .max_results(climate::MAX_LOCATION_EVENTS as u32);

        let (weather, outcome) = tokio::join!(
            race("Weather", budget, self.providers.weather.current(query)),
            race(
                "Location climate events",
                budget,
                self.providers.search.search(&request)
            ),
        );

        let weather = weather.unwrap_or_else(|| {
            tracing::debug!("Using fallback weather for {}", location);
            fallback::climate::weather(query)
        });

        let events = match outcome {
            Some(outcome) if !outcome.results.is_empty() => {
                climate::location_events(query, &outcome.results)
            }
            _ => {
                tracing::debug!("Using fallback climate event for {}", location);
                vec![fallback::climate::location_event(query)]
            }
        };

        LocationClimate {
            location,
            weather,
            events,
        }
    }

    /// Recent events from a nationwide search. Empty when the search yields
    /// nothing; the historical set is always added separately.
    pub async fn national_climate_events(&self) -> Vec<ClimateEventCandidate> {
        let request = SearchRequest::new(
            NATIONAL_QUERY,
            Self::millis(self.settings.search.climate_timeout_ms),
        )
        .max_results(5);

        match race(
            "National climate events",
            self.budgets.climate_race(),
            self.providers.search.search(&request),
        )
        .await
        {
            Some(outcome) => climate::national_events(&outcome.results),
            None => Vec::new(),
        }
    }

    /// Everything the climate map shows: the historical events, recent
    /// national events and, when a location is selected, its local events
    pub async fn climate_map(&self, query: Option<&LocationQuery>) -> MapDataset {
        match query {
            Some(query) => self.climate_overview(query).await.1,
            None => Self::assemble_map(self.national_climate_events().await, Vec::new()),
        }
    }

    /// Weather card and map data for a selected location, sharing one
    /// location lookup between them
    pub async fn climate_overview(&self, query: &LocationQuery) -> (LocationClimate, MapDataset) {
        let (local, national) =
            tokio::join!(self.location_climate(query), self.national_climate_events());

        let dataset = Self::assemble_map(national, local.events.clone());
        (local, dataset)
    }

    fn assemble_map(
        national: Vec<ClimateEventCandidate>,
        local: Vec<ClimateEventCandidate>,
    ) -> MapDataset {
        let dataset = climate::map_dataset(
            fallback::climate::historical_events(),
            national.into_iter().chain(local),
        );

        tracing::info!(
            "Climate map: {} events ({} bushfire, {} flood, {} drought)",
            dataset.legend.total,
            dataset.legend.bushfire,
            dataset.legend.flood,
            dataset.legend.drought
        );

        dataset
    }
}
