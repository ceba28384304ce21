// StoryMap engine
// Main entry point for the storymap binary

use anyhow::Context;
use clap::Parser;
use sdk::{LocationQuery, StoryMapErrorExt};
use storymap_engine::cli::{Cli, Command};
use storymap_engine::config::Config;
use storymap_engine::handlers::{
    handle_climate, handle_insights, handle_narrative, handle_providers, handle_recommendations,
    handle_search, handle_stories, handle_story, missing_providers, OutputFormat,
};
use storymap_engine::orchestrator::Orchestrator;
use storymap_engine::secrets::Credentials;
use storymap_engine::telemetry::init_telemetry_with_level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let loaded = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load_or_create(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Hint: {}", e.user_hint());
            return Err(e).context("Failed to load configuration");
        }
    };

    // --log wins over the config file; RUST_LOG wins over both
    let level = cli.log.as_deref().unwrap_or(&config.core.log_level);
    init_telemetry_with_level(level);

    tracing::info!(
        "StoryMap engine v{} ({} - {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_COMMIT_HASH"),
        env!("BUILD_TIMESTAMP")
    );

    let credentials = Credentials::from_env();
    let orchestrator = Orchestrator::from_config(&config, &credentials);

    let missing = missing_providers(&orchestrator);
    if !missing.is_empty() {
        tracing::debug!(
            "No credential for {} provider(s), their data will come from fallback content",
            missing.len()
        );
    }

    match cli.command {
        Command::Search { query } => handle_search(&orchestrator, &query, format).await,

        Command::Story { location } => handle_story(&orchestrator, &location, format).await,

        Command::Narrative { location, theme } => {
            handle_narrative(&orchestrator, &location, theme.as_deref(), format).await
        }

        Command::Stories { location } => handle_stories(&orchestrator, &location, format).await,

        Command::Insights { location } => {
            handle_insights(&orchestrator, &location, format).await
        }

        Command::Recommendations { location } => {
            handle_recommendations(&orchestrator, &location, format).await
        }

        Command::Climate { location, lat, lng } => {
            let query = location.map(|name| {
                let query = LocationQuery::new(name);
                match (lat, lng) {
                    (Some(lat), Some(lng)) => query.with_coordinates(lat, lng),
                    _ => query,
                }
            });
            handle_climate(&orchestrator, query, format).await
        }

        Command::Providers => handle_providers(&orchestrator, format),
    }
}
