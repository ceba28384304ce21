use futures::future::join_all;
use sdk::{ApiUsage, DataSource, LocationQuery, NarrativeRecord, StoryCollection, StoryDataContext};

use super::{race, Orchestrator};
use crate::adapters::{truncate, Message, Provider, SearchRequest};
use crate::fallback::narratives;

const SYSTEM_PROMPT: &str =
    "You are a storyteller. Write engaging, respectful stories about Australian locations.";

/// Provenance label when search context fed the generated story
const SEARCH_AND_GENERATION_LABEL: &str = "Tavily + Groq APIs";

const MAX_CONTEXT_CHARS: usize = 800;
const MAX_PROMPT_CONTEXT_CHARS: usize = 500;

fn user_prompt(location: &str, theme: &str, context: Option<&str>) -> String {
    match context {
        Some(context) => format!(
            "Based on this info about {location}: \"{}\"\n\nWrite a 200-word story about {location} focusing on {theme}. Make it engaging and respectful.",
            truncate(context, MAX_PROMPT_CONTEXT_CHARS)
        ),
        None => format!(
            "Write a 200-word story about {location}, Australia, focusing on {theme}. Include cultural heritage and community spirit."
        ),
    }
}

fn record(location: &str, theme: &str, title: String, content: String, data_source: DataSource) -> NarrativeRecord {
    NarrativeRecord {
        id: None,
        title,
        content,
        theme: theme.to_string(),
        location: location.to_string(),
        data_source,
    }
}

impl Orchestrator {
    /// Live background for a themed narrative: the search answer plus the
    /// first two result contents
    async fn narrative_context(&self, location: &str, theme: &str) -> Option<String> {
        let request = SearchRequest::new(
            narratives::context_query(location, theme),
            Self::millis(self.settings.search.context_timeout_ms),
        );

        let outcome = self.providers.search.search(&request).await?;

        let parts: Vec<&str> = outcome
            .answer
            .as_deref()
            .into_iter()
            .chain(outcome.results.iter().take(2).filter_map(|hit| hit.text()))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return None;
        }

        Some(truncate(&parts.join(" "), MAX_CONTEXT_CHARS))
    }

    async fn narrate(&self, location: &str, theme: &str) -> (NarrativeRecord, ApiUsage) {
        if !self.providers.text_generation.is_configured() {
            tracing::debug!("No text generation credential, narrating {} from context", location);

            let context = race(
                "Narrative context",
                Self::millis(self.settings.search.context_timeout_ms),
                self.narrative_context(location, theme),
            )
            .await;

            let usage = ApiUsage {
                search: context.is_some(),
                text_generation: false,
            };
            let (content, data_source) = match context {
                Some(context) => (context, DataSource::live(Provider::Search.label())),
                None => (narratives::story(location, theme), DataSource::Fallback),
            };

            return (
                record(location, theme, format!("Tales from {}", location), content, data_source),
                usage,
            );
        }

        let context = race(
            "Narrative context",
            self.budgets.context_race(),
            self.narrative_context(location, theme),
        )
        .await;

        let messages = [
            Message::system(SYSTEM_PROMPT),
            Message::user(user_prompt(location, theme, context.as_deref())),
        ];

        let generated = race(
            "Narrative generation",
            Self::millis(self.settings.text_generation.timeout_ms),
            self.providers.text_generation.complete(&messages),
        )
        .await;

        match generated {
            Some(content) => {
                let data_source = if context.is_some() {
                    DataSource::live(SEARCH_AND_GENERATION_LABEL)
                } else {
                    DataSource::live(Provider::TextGeneration.label())
                };
                (
                    record(location, theme, format!("Stories from {}", location), content, data_source),
                    ApiUsage {
                        search: context.is_some(),
                        text_generation: true,
                    },
                )
            }
            None => (
                record(
                    location,
                    theme,
                    format!("Heritage of {}", location),
                    narratives::story(location, theme),
                    DataSource::Fallback,
                ),
                ApiUsage {
                    search: false,
                    text_generation: false,
                },
            ),
        }
    }

    /// A single themed narrative for a location
    pub async fn generate_narrative(&self, location: &str, theme: &str) -> NarrativeRecord {
        let location = LocationQuery::new(location).display_name().to_string();
        let theme = match theme.trim() {
            "" => narratives::DEFAULT_THEME,
            theme => theme,
        };

        tracing::info!("Generating '{}' narrative for {}", theme, location);

        self.narrate(&location, theme).await.0
    }

    /// One narrative per story theme, generated concurrently.
    ///
    /// Each theme is raced independently; a slow or failed theme gets its
    /// fallback story without affecting the others.
    pub async fn generate_stories(&self, location: &str) -> StoryCollection {
        let location = LocationQuery::new(location).display_name().to_string();
        let budget = self.budgets.story_race();

        tracing::info!(
            "Generating {} stories for {}",
            narratives::STORY_THEMES.len(),
            location
        );

        let pipelines = narratives::STORY_THEMES
            .iter()
            .enumerate()
            .map(|(index, theme)| {
                let location = location.as_str();
                async move {
                    let id = Some(index as u32 + 1);
                    let label = format!("Story '{}'", theme);
                    match race(&label, budget, async { Some(self.narrate(location, theme).await) })
                        .await
                    {
                        Some((story, usage)) => (NarrativeRecord { id, ..story }, usage),
                        None => (
                            NarrativeRecord {
                                id,
                                ..record(
                                    location,
                                    theme,
                                    format!("{} of {}", narratives::capitalize(theme), location),
                                    narratives::story(location, theme),
                                    DataSource::Fallback,
                                )
                            },
                            ApiUsage {
                                search: false,
                                text_generation: false,
                            },
                        ),
                    }
                }
            });

        let results = join_all(pipelines).await;

        let mut data_sources: Vec<DataSource> = Vec::new();
        let mut api_usage = ApiUsage {
            search: false,
            text_generation: false,
        };
        for (story, usage) in &results {
            if !data_sources.contains(&story.data_source) {
                data_sources.push(story.data_source.clone());
            }
            api_usage.search |= usage.search;
            api_usage.text_generation |= usage.text_generation;
        }

        let stories: Vec<NarrativeRecord> = results.into_iter().map(|(story, _)| story).collect();

        StoryCollection {
            data_context: StoryDataContext {
                location,
                total_stories: stories.len(),
                themes: narratives::STORY_THEMES.iter().map(|t| t.to_string()).collect(),
                data_sources,
                api_usage,
            },
            stories,
        }
    }
}
