//! Command handlers for CLI operations
//!
//! Every handler runs one orchestrator operation and prints its result,
//! either as readable text or as the JSON the map bindings consume. The
//! orchestrator never fails, so the only errors here come from writing
//! output.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;

use sdk::{
    CulturalInsights, CulturalRecommendations, InsightSection, LocationClimate, LocationQuery,
    LocationStory, LocationSummary, MapDataset, NarrativeRecord, RecommendationRecord,
    StoryCollection,
};

use crate::adapters::Provider;
use crate::orchestrator::Orchestrator;
use crate::secrets;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

fn emit<T: Serialize>(value: &T, format: OutputFormat, render: impl FnOnce(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render(value)),
        OutputFormat::Json => {
            let output =
                serde_json::to_string_pretty(value).context("Failed to serialize result")?;
            println!("{}", output);
        }
    }
    Ok(())
}

/// Resolve a free-text query to a location
pub async fn handle_search(orchestrator: &Orchestrator, query: &str, format: OutputFormat) -> Result<()> {
    let summary = orchestrator.search_location(query).await;
    emit(&summary, format, render_location)
}

pub async fn handle_story(orchestrator: &Orchestrator, location: &str, format: OutputFormat) -> Result<()> {
    let story = orchestrator.location_story(location).await;
    emit(&story, format, render_location_story)
}

pub async fn handle_narrative(
    orchestrator: &Orchestrator,
    location: &str,
    theme: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let narrative = orchestrator
        .generate_narrative(location, theme.unwrap_or_default())
        .await;
    emit(&narrative, format, render_narrative)
}

pub async fn handle_stories(orchestrator: &Orchestrator, location: &str, format: OutputFormat) -> Result<()> {
    let collection = orchestrator.generate_stories(location).await;
    emit(&collection, format, render_stories)
}

pub async fn handle_insights(orchestrator: &Orchestrator, location: &str, format: OutputFormat) -> Result<()> {
    let insights = orchestrator.cultural_insights(location).await;
    emit(&insights, format, render_insights)
}

pub async fn handle_recommendations(
    orchestrator: &Orchestrator,
    location: &str,
    format: OutputFormat,
) -> Result<()> {
    let recommendations = orchestrator.cultural_recommendations(location).await;
    emit(&recommendations, format, render_recommendations)
}

/// Climate map, plus current weather when a location is selected
pub async fn handle_climate(
    orchestrator: &Orchestrator,
    query: Option<LocationQuery>,
    format: OutputFormat,
) -> Result<()> {
    let (local, dataset) = match &query {
        Some(query) => {
            let (local, dataset) = orchestrator.climate_overview(query).await;
            (Some(local), dataset)
        }
        None => (None, orchestrator.climate_map(None).await),
    };

    match format {
        OutputFormat::Text => {
            if let Some(local) = &local {
                print!("{}", render_location_climate(local));
                println!();
            }
            print!("{}", render_map(&dataset));
        }
        OutputFormat::Json => {
            let output = json!({
                "location": local,
                "map": dataset,
            });
            let output =
                serde_json::to_string_pretty(&output).context("Failed to serialize result")?;
            println!("{}", output);
        }
    }
    Ok(())
}

/// List each provider and whether its credential is configured
pub fn handle_providers(orchestrator: &Orchestrator, format: OutputFormat) -> Result<()> {
    let status = orchestrator.provider_status();

    match format {
        OutputFormat::Text => {
            println!("Providers:");
            for (provider, configured) in &status {
                println!(
                    "  {:<16} {:<20} {}",
                    provider.label(),
                    secrets::env_var(*provider),
                    if *configured {
                        "configured"
                    } else {
                        "not configured (fallback content)"
                    }
                );
            }
        }
        OutputFormat::Json => {
            let providers: Vec<_> = status
                .iter()
                .map(|(provider, configured)| {
                    json!({
                        "provider": provider.to_string(),
                        "name": provider.label(),
                        "env_var": secrets::env_var(*provider),
                        "configured": configured,
                    })
                })
                .collect();
            let output = serde_json::to_string_pretty(&json!({ "providers": providers }))
                .context("Failed to serialize provider status")?;
            println!("{}", output);
        }
    }
    Ok(())
}

/// Provider names without a configured credential
pub fn missing_providers(orchestrator: &Orchestrator) -> Vec<Provider> {
    orchestrator
        .provider_status()
        .into_iter()
        .filter(|(_, configured)| !configured)
        .map(|(provider, _)| provider)
        .collect()
}

pub fn render_location(summary: &LocationSummary) -> String {
    format!(
        "{} ({:.4}, {:.4}) - {}\n{}\n[source: {}]\n",
        summary.name,
        summary.lat,
        summary.lng,
        summary.region,
        summary.description,
        summary.data_source
    )
}

pub fn render_location_story(story: &LocationStory) -> String {
    let mut out = format!("{}\n\n{}\n", story.title, story.content);
    if !story.cultural_insights.is_empty() {
        out.push('\n');
        for insight in &story.cultural_insights {
            out.push_str(&format!("  * {}\n", insight));
        }
    }
    out.push_str(&format!("[source: {}]\n", story.data_source));
    out
}

pub fn render_narrative(narrative: &NarrativeRecord) -> String {
    format!(
        "{} ({})\n\n{}\n[source: {}]\n",
        narrative.title, narrative.theme, narrative.content, narrative.data_source
    )
}

pub fn render_stories(collection: &StoryCollection) -> String {
    let mut out = String::new();
    for story in &collection.stories {
        if let Some(id) = story.id {
            out.push_str(&format!("{}. ", id));
        }
        out.push_str(&render_narrative(story));
        out.push('\n');
    }

    let context = &collection.data_context;
    let sources: Vec<&str> = context.data_sources.iter().map(|s| s.as_str()).collect();
    out.push_str(&format!(
        "{} stories for {} (sources: {})\n",
        context.total_stories,
        context.location,
        sources.join(", ")
    ));
    out
}

fn render_items(items: &[RecommendationRecord]) -> String {
    items
        .iter()
        .map(|item| {
            let mut line = format!("  - {} [{}]: {}\n", item.name, item.category, item.description);
            if let Some(url) = &item.url {
                line.push_str(&format!("    {}\n", url));
            }
            line
        })
        .collect()
}

fn render_section(section: &InsightSection) -> String {
    format!(
        "{} [source: {}]\n{}\n{}\n",
        section.title,
        section.data_source,
        section.summary,
        render_items(&section.items)
    )
}

pub fn render_insights(insights: &CulturalInsights) -> String {
    let mut out: String = insights.sections().into_iter().map(render_section).collect();

    let status = &insights.metadata.provider_status;
    out.push_str(&format!(
        "{} items for {} (recommendation: {:?}, search: {:?}, updated {})\n",
        insights.metadata.total_items,
        insights.location,
        status.recommendation,
        status.search,
        insights.metadata.last_updated
    ));
    out
}

pub fn render_recommendations(recommendations: &CulturalRecommendations) -> String {
    let mut out = format!(
        "Recommendations for {} [source: {}]\n",
        recommendations.location, recommendations.data_source
    );
    for (heading, items) in [
        ("Music", &recommendations.music),
        ("Movies", &recommendations.movies),
        ("Books", &recommendations.books),
    ] {
        if items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n{}:\n", heading));
        out.push_str(&render_items(items));
    }
    out
}

pub fn render_location_climate(climate: &LocationClimate) -> String {
    let weather = &climate.weather;
    let mut out = format!(
        "Weather in {}: {}°C, {}, humidity {}%, wind {:.1} m/s [source: {}]\nRecent events:\n",
        climate.location,
        weather.temperature,
        weather.description,
        weather.humidity,
        weather.wind_speed,
        weather.data_source
    );
    for event in &climate.events {
        out.push_str(&format!(
            "  - {} {} ({}, {}): {}\n",
            event.year, event.kind, event.severity, event.data_source, event.description
        ));
    }
    out
}

pub fn render_map(dataset: &MapDataset) -> String {
    let legend = &dataset.legend;
    let mut out = format!(
        "Climate map: {} events (bushfire {}, flood {}, drought {})\n",
        legend.total, legend.bushfire, legend.flood, legend.drought
    );
    for event in &dataset.events {
        out.push_str(&format!(
            "  [{}] {} {} - {} ({:.2}, {:.2}) x{} [source: {}]\n",
            event.id,
            event.year,
            event.kind,
            event.location,
            event.coordinates.lat,
            event.coordinates.lng,
            dataset.frequency(&event.location, event.kind),
            event.data_source
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdk::{ApiUsage, DataSource, StoryDataContext};

    fn narrative(id: Option<u32>, source: DataSource) -> NarrativeRecord {
        NarrativeRecord {
            id,
            title: "Tales from Hobart".to_string(),
            content: "A story".to_string(),
            theme: "cultural heritage".to_string(),
            location: "Hobart".to_string(),
            data_source: source,
        }
    }

    #[test]
    fn test_render_location() {
        let summary = LocationSummary {
            name: "Hobart".to_string(),
            lat: -42.8821,
            lng: 147.3272,
            description: "Tasmania's capital".to_string(),
            region: "Australia".to_string(),
            data_source: DataSource::Fallback,
        };
        let text = render_location(&summary);
        assert!(text.starts_with("Hobart (-42.8821, 147.3272) - Australia"));
        assert!(text.contains("[source: Fallback]"));
    }

    #[test]
    fn test_render_stories_lists_sources() {
        let collection = StoryCollection {
            stories: vec![
                narrative(Some(1), DataSource::Fallback),
                narrative(Some(2), DataSource::live("Tavily API")),
            ],
            data_context: StoryDataContext {
                location: "Hobart".to_string(),
                total_stories: 2,
                themes: vec![],
                data_sources: vec![DataSource::Fallback, DataSource::live("Tavily API")],
                api_usage: ApiUsage {
                    search: true,
                    text_generation: false,
                },
            },
        };
        let text = render_stories(&collection);
        assert!(text.contains("1. Tales from Hobart"));
        assert!(text.contains("2. Tales from Hobart"));
        assert!(text.contains("sources: Fallback, Tavily API"));
    }

    #[test]
    fn test_render_recommendations_skips_empty_lists() {
        let recommendations = CulturalRecommendations {
            location: "Hobart".to_string(),
            music: vec![RecommendationRecord {
                name: "Artist".to_string(),
                category: "Music".to_string(),
                description: "Musical artist recommended for Hobart".to_string(),
                url: Some("https://example.com".to_string()),
                data_source: DataSource::live("TasteDive API"),
            }],
            movies: vec![],
            books: vec![],
            data_source: DataSource::live("TasteDive API"),
        };
        let text = render_recommendations(&recommendations);
        assert!(text.contains("Music:"));
        assert!(text.contains("https://example.com"));
        assert!(!text.contains("Movies:"));
        assert!(!text.contains("Books:"));
    }

    #[test]
    fn test_render_climate_lines() {
        let query = LocationQuery::new("Hobart");
        let climate = LocationClimate {
            location: "Hobart".to_string(),
            weather: crate::fallback::climate::weather(&query),
            events: vec![crate::fallback::climate::location_event(&query)],
        };
        let text = render_location_climate(&climate);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Weather in Hobart: 22°C, Clear sky, humidity 65%"));
        assert_eq!(lines[1], "Recent events:");
        assert!(lines[2].starts_with("  - 2020 Bushfire (Moderate, Fallback): "));

        let dataset =
            crate::climate::map_dataset(crate::fallback::climate::historical_events(), vec![]);
        let text = render_map(&dataset);
        assert!(text.starts_with("Climate map: 15 events"));
        assert_eq!(text.lines().count(), 16);
    }
}
