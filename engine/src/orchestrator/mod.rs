//! Orchestrator
//!
//! Combines adapter calls into the composite results the map and card views
//! consume. For every request it:
//!
//! 1. starts all required adapter calls concurrently,
//! 2. races each call against an orchestrator-level budget,
//! 3. substitutes fallback content for every call that yielded nothing,
//! 4. tags each component with its data source.
//!
//! No operation returns an error. Total failure of every provider still
//! produces a fully populated result built from fallback content.

use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    GroqAdapter, OpenWeatherAdapter, Provider, RecommendationProvider, SearchProvider,
    TasteDiveAdapter, TavilyAdapter, TextGenerator, WeatherProvider,
};
use crate::config::{Config, OrchestratorConfig, ProvidersConfig};
use crate::secrets::Credentials;

mod climate;
mod culture;
mod location;
mod narrative;
pub mod race;
pub mod sequencer;

pub use race::race;
pub use sequencer::{RequestSequencer, Ticket};

/// One handle per external service
#[derive(Clone)]
pub struct ProviderSet {
    pub search: Arc<dyn SearchProvider>,
    pub recommendation: Arc<dyn RecommendationProvider>,
    pub weather: Arc<dyn WeatherProvider>,
    pub text_generation: Arc<dyn TextGenerator>,
}

impl ProviderSet {
    /// Build the real HTTP adapters, handing each its own credential
    pub fn from_config(providers: &ProvidersConfig, credentials: &Credentials) -> Self {
        let key = |provider: Provider| credentials.get(provider).cloned();

        Self {
            search: Arc::new(TavilyAdapter::new(
                providers.search.clone(),
                key(Provider::Search),
            )),
            recommendation: Arc::new(TasteDiveAdapter::new(
                providers.recommendation.clone(),
                key(Provider::Recommendation),
            )),
            weather: Arc::new(OpenWeatherAdapter::new(
                providers.weather.clone(),
                key(Provider::Weather),
            )),
            text_generation: Arc::new(GroqAdapter::new(
                providers.text_generation.clone(),
                key(Provider::TextGeneration),
            )),
        }
    }
}

/// Request orchestrator
///
/// Cheap to clone; all shared state is read-only.
#[derive(Clone)]
pub struct Orchestrator {
    providers: ProviderSet,
    settings: Arc<ProvidersConfig>,
    budgets: Arc<OrchestratorConfig>,
}

impl Orchestrator {
    /// Create an orchestrator over explicit provider handles
    pub fn new(providers: ProviderSet, config: &Config) -> Self {
        Self {
            providers,
            settings: Arc::new(config.providers.clone()),
            budgets: Arc::new(config.orchestrator.clone()),
        }
    }

    /// Create an orchestrator backed by the real HTTP adapters
    pub fn from_config(config: &Config, credentials: &Credentials) -> Self {
        let providers = ProviderSet::from_config(&config.providers, credentials);
        tracing::debug!("Orchestrator initialised");
        Self::new(providers, config)
    }

    /// Which providers have a credential configured
    pub fn provider_status(&self) -> Vec<(Provider, bool)> {
        vec![
            (Provider::Search, self.providers.search.is_configured()),
            (
                Provider::Recommendation,
                self.providers.recommendation.is_configured(),
            ),
            (Provider::Weather, self.providers.weather.is_configured()),
            (
                Provider::TextGeneration,
                self.providers.text_generation.is_configured(),
            ),
        ]
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }
}
