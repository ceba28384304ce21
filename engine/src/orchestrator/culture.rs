use sdk::{
    CulturalInsights, CulturalRecommendations, DataSource, InsightSection, InsightsMetadata,
    LocationQuery, ProviderState, ProviderStatus, RecommendationRecord,
};

use super::{race, Orchestrator};
use crate::adapters::{
    truncate_with_ellipsis, Provider, SearchDepth, SearchRequest, SimilarKind, SimilarRequest,
};
use crate::fallback::culture;

/// Items kept per search-backed insight section
const SECTION_ITEMS: usize = 4;

#[derive(Debug, Clone, Copy)]
enum Topic {
    Art,
    Food,
    Events,
}

impl Topic {
    fn query(&self, location: &str) -> String {
        match self {
            Self::Art => format!(
                "{location} Australia art galleries museums artists exhibitions contemporary aboriginal"
            ),
            Self::Food => format!(
                "{location} Australia local food restaurants cuisine traditional dishes specialties"
            ),
            Self::Events => format!(
                "{location} Australia events festivals cultural celebrations community activities"
            ),
        }
    }

    fn title(&self, location: &str) -> String {
        match self {
            Self::Art => format!("Art from {location}"),
            Self::Food => format!("Local Cuisine from {location}"),
            Self::Events => format!("Events in {location}"),
        }
    }

    fn summary(&self, location: &str, live: bool) -> String {
        match (self, live) {
            (Self::Art, true) => format!("Art galleries and exhibitions in {location} via Tavily API"),
            (Self::Art, false) => format!("Artistic expressions from {location}"),
            (Self::Food, true) => {
                format!("Food and dining in {location} discovered through Tavily API")
            }
            (Self::Food, false) => format!("Taste the flavors of {location}"),
            (Self::Events, true) => format!("Festivals and cultural events in {location} via Tavily API"),
            (Self::Events, false) => format!("Cultural celebrations in {location}"),
        }
    }

    /// Category, placeholder name prefix and description for live items
    fn item_defaults(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Art => ("Local Artists", "Art Gallery", "Local art venue or exhibition"),
            Self::Food => ("Local Cuisine", "Local Dish", "Local food specialty"),
            Self::Events => ("Various dates", "Cultural Event", "Local cultural event or festival"),
        }
    }

    fn fallback(&self, location: &str) -> Vec<RecommendationRecord> {
        match self {
            Self::Art => culture::art(location),
            Self::Food => culture::food(location),
            Self::Events => culture::events(location),
        }
    }
}

fn section(title: String, summary: String, items: Vec<RecommendationRecord>, data_source: DataSource) -> InsightSection {
    InsightSection {
        title,
        summary,
        items,
        data_source,
    }
}

fn state(section: &InsightSection) -> ProviderState {
    if section.data_source.is_live() {
        ProviderState::Active
    } else {
        ProviderState::Fallback
    }
}

impl Orchestrator {
    async fn topic_section(&self, location: &str, topic: Topic) -> InsightSection {
        let request = SearchRequest::new(
            topic.query(location),
            Self::millis(self.settings.search.culture_timeout_ms),
        )
        .depth(SearchDepth::Advanced)
        .max_results(5);

        let label = format!("{:?} section", topic);
        let (category, placeholder, default_description) = topic.item_defaults();

        let items: Vec<RecommendationRecord> = race(
            &label,
            self.budgets.section_race(),
            self.providers.search.search(&request),
        )
        .await
        .map(|outcome| {
            outcome
                .results
                .into_iter()
                .take(SECTION_ITEMS)
                .enumerate()
                .map(|(index, hit)| RecommendationRecord {
                    name: hit
                        .title
                        .clone()
                        .filter(|title| !title.trim().is_empty())
                        .unwrap_or_else(|| format!("{} {}", placeholder, index + 1)),
                    category: category.to_string(),
                    description: hit
                        .text()
                        .map(|content| truncate_with_ellipsis(content, 120))
                        .unwrap_or_else(|| default_description.to_string()),
                    url: hit.url.clone().filter(|url| !url.is_empty()),
                    data_source: DataSource::live(Provider::Search.label()),
                })
                .collect()
        })
        .unwrap_or_default();

        if items.is_empty() {
            tracing::debug!("Using fallback {:?} section for {}", topic, location);
            section(
                topic.title(location),
                topic.summary(location, false),
                topic.fallback(location),
                DataSource::Fallback,
            )
        } else {
            section(
                topic.title(location),
                topic.summary(location, true),
                items,
                DataSource::live(Provider::Search.label()),
            )
        }
    }

    async fn music_section(&self, location: &str) -> InsightSection {
        let request = SimilarRequest {
            query: format!("{} Australia music", location),
            subject: location.to_string(),
            kind: SimilarKind::Music,
            limit: self.settings.recommendation.music_limit,
            info: true,
        };

        let title = format!("Music from {}", location);

        match race(
            "Music section",
            self.budgets.section_race(),
            self.providers.recommendation.similar(&request),
        )
        .await
        {
            Some(items) => section(
                title,
                format!("Music recommendations for {} powered by TasteDive API", location),
                items,
                DataSource::live(Provider::Recommendation.label()),
            ),
            None => {
                tracing::debug!("Using fallback music section for {}", location);
                section(
                    title,
                    format!("Discover the music scene of {}", location),
                    culture::recommendations(location).music,
                    DataSource::Fallback,
                )
            }
        }
    }

    /// Music, art, food and events for a location.
    ///
    /// All four sections are fetched concurrently and each falls back on
    /// its own, so the result always has four populated sections.
    pub async fn cultural_insights(&self, location: &str) -> CulturalInsights {
        let location = LocationQuery::new(location).display_name().to_string();

        tracing::info!("Fetching cultural insights for {}", location);

        let (music, art, food, events) = tokio::join!(
            self.music_section(&location),
            self.topic_section(&location, Topic::Art),
            self.topic_section(&location, Topic::Food),
            self.topic_section(&location, Topic::Events),
        );

        let search_state = if [&art, &food, &events]
            .iter()
            .any(|s| state(s) == ProviderState::Active)
        {
            ProviderState::Active
        } else {
            ProviderState::Fallback
        };

        let metadata = InsightsMetadata {
            location: location.clone(),
            last_updated: chrono::Utc::now().to_rfc3339(),
            total_items: music.items.len() + art.items.len() + food.items.len() + events.items.len(),
            provider_status: ProviderStatus {
                recommendation: state(&music),
                search: search_state,
            },
        };

        tracing::debug!(
            "Cultural insights for {}: {} items",
            location,
            metadata.total_items
        );

        CulturalInsights {
            location,
            music,
            art,
            food,
            events,
            metadata,
        }
    }

    /// Music and film recommendations, with a hand-picked city list when
    /// the provider has nothing
    pub async fn cultural_recommendations(&self, location: &str) -> CulturalRecommendations {
        let name = location.split(',').next().unwrap_or_default().trim();
        let name = LocationQuery::new(name).display_name().to_string();

        tracing::info!("Fetching recommendations for {}", name);

        let settings = &self.settings.recommendation;
        let budget = Self::millis(settings.timeout_ms);
        let music_request = SimilarRequest {
            query: format!("{} Australia music", name),
            subject: name.clone(),
            kind: SimilarKind::Music,
            limit: settings.music_limit,
            info: true,
        };
        let movie_request = SimilarRequest {
            query: format!("{} Australia", name),
            subject: name.clone(),
            kind: SimilarKind::Movies,
            limit: settings.movie_limit,
            info: true,
        };

        let (music, movies) = tokio::join!(
            race(
                "Music recommendations",
                budget,
                self.providers.recommendation.similar(&music_request)
            ),
            race(
                "Movie recommendations",
                budget,
                self.providers.recommendation.similar(&movie_request)
            ),
        );

        if music.is_none() && movies.is_none() {
            tracing::debug!("Using fallback recommendations for {}", name);
            let fallback = culture::recommendations(&name);
            return CulturalRecommendations {
                location: name,
                music: fallback.music,
                movies: fallback.movies,
                books: fallback.books,
                data_source: DataSource::Fallback,
            };
        }

        CulturalRecommendations {
            location: name,
            music: music.unwrap_or_default(),
            movies: movies.unwrap_or_default(),
            books: Vec::new(),
            data_source: DataSource::live(Provider::Recommendation.label()),
        }
    }
}
