//! Configuration management
//!
//! This module handles loading, validation, and management of the StoryMap
//! configuration. Configuration is stored in TOML format at
//! ~/.storymap/config.toml.
//!
//! # Configuration Sections
//!
//! - **core**: Log level
//! - **providers**: Endpoint, model and per-call timeout for each external
//!   service (search, recommendation, weather, text generation)
//! - **orchestrator**: Race budgets applied on top of the adapter timeouts
//!
//! Provider credentials are never stored here. They come from the
//! environment, see [`crate::secrets::Credentials`].
//!
//! # Examples
//!
//! ```no_run
//! use storymap_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load_or_create()?;
//! println!("Search endpoint: {}", config.providers.search.base_url);
//! # Ok(())
//! # }
//! ```

use sdk::errors::EngineError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Core settings
    #[serde(default)]
    pub core: CoreConfig,

    /// External service settings
    #[serde(default)]
    pub providers: ProvidersConfig,

    /// Orchestrator race budgets
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Settings for every external service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Search/answer provider (Tavily)
    #[serde(default)]
    pub search: SearchConfig,

    /// Recommendation provider (TasteDive)
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// Weather provider (OpenWeatherMap)
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Text-generation provider (Groq, OpenAI-compatible)
    #[serde(default)]
    pub text_generation: TextGenerationConfig,
}

/// Search provider configuration
///
/// The search provider serves several use cases with different latency
/// expectations, so each gets its own timeout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Base URL for the search API
    #[serde(default = "default_search_base_url")]
    pub base_url: String,

    /// Timeout for location lookups and location stories (ms)
    #[serde(default = "default_location_timeout")]
    pub location_timeout_ms: u64,

    /// Timeout for art/food/events lookups (ms)
    #[serde(default = "default_culture_timeout")]
    pub culture_timeout_ms: u64,

    /// Timeout for narrative context lookups (ms)
    #[serde(default = "default_context_timeout")]
    pub context_timeout_ms: u64,

    /// Timeout for climate event lookups (ms)
    #[serde(default = "default_climate_timeout")]
    pub climate_timeout_ms: u64,
    // Note: API key comes from TAVILY_API_KEY, not from config
}

/// Recommendation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Base URL for the recommendation API
    #[serde(default = "default_recommendation_base_url")]
    pub base_url: String,

    /// Per-call timeout (ms)
    #[serde(default = "default_recommendation_timeout")]
    pub timeout_ms: u64,

    /// Maximum music results requested
    #[serde(default = "default_music_limit")]
    pub music_limit: u32,

    /// Maximum movie results requested
    #[serde(default = "default_movie_limit")]
    pub movie_limit: u32,
    // Note: API key comes from TASTEDIVE_API_KEY, not from config
}

/// Weather provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,

    /// Per-call timeout (ms)
    #[serde(default = "default_weather_timeout")]
    pub timeout_ms: u64,

    /// Unit system passed to the provider
    #[serde(default = "default_units")]
    pub units: String,
    // Note: API key comes from OPENWEATHER_API_KEY, not from config
}

/// Text-generation provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextGenerationConfig {
    /// Base URL for the chat completions API
    #[serde(default = "default_text_generation_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_text_generation_model")]
    pub model: String,

    /// Per-call timeout (ms)
    #[serde(default = "default_text_generation_timeout")]
    pub timeout_ms: u64,

    /// Completion token limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling cutoff (0.0-1.0]
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    // Note: API key comes from GROQ_API_KEY, not from config
}

/// Orchestrator race budgets
///
/// Each adapter call is raced against one of these budgets so a
/// misconfigured adapter timeout cannot stall a composite request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Budget for the narrative context lookup before generation (ms)
    #[serde(default = "default_context_race")]
    pub context_race_ms: u64,

    /// Budget for each story in a multi-story request (ms)
    #[serde(default = "default_story_race")]
    pub story_race_ms: u64,

    /// Budget for each cultural insights section (ms)
    #[serde(default = "default_section_race")]
    pub section_race_ms: u64,

    /// Budget for weather and climate event lookups (ms)
    #[serde(default = "default_climate_race")]
    pub climate_race_ms: u64,
}

impl OrchestratorConfig {
    pub fn context_race(&self) -> Duration {
        Duration::from_millis(self.context_race_ms)
    }

    pub fn story_race(&self) -> Duration {
        Duration::from_millis(self.story_race_ms)
    }

    pub fn section_race(&self) -> Duration {
        Duration::from_millis(self.section_race_ms)
    }

    pub fn climate_race(&self) -> Duration {
        Duration::from_millis(self.climate_race_ms)
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_search_base_url() -> String {
    "https://api.tavily.com".to_string()
}

fn default_location_timeout() -> u64 {
    15_000
}

fn default_culture_timeout() -> u64 {
    20_000
}

fn default_context_timeout() -> u64 {
    5_000
}

fn default_climate_timeout() -> u64 {
    8_000
}

fn default_recommendation_base_url() -> String {
    "https://tastedive.com/api".to_string()
}

fn default_recommendation_timeout() -> u64 {
    15_000
}

fn default_music_limit() -> u32 {
    8
}

fn default_movie_limit() -> u32 {
    5
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u64 {
    10_000
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_text_generation_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_text_generation_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_text_generation_timeout() -> u64 {
    10_000
}

fn default_max_tokens() -> u32 {
    300
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.9
}

fn default_context_race() -> u64 {
    3_000
}

fn default_story_race() -> u64 {
    8_000
}

fn default_section_race() -> u64 {
    15_000
}

fn default_climate_race() -> u64 {
    8_000
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            location_timeout_ms: default_location_timeout(),
            culture_timeout_ms: default_culture_timeout(),
            context_timeout_ms: default_context_timeout(),
            climate_timeout_ms: default_climate_timeout(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            base_url: default_recommendation_base_url(),
            timeout_ms: default_recommendation_timeout(),
            music_limit: default_music_limit(),
            movie_limit: default_movie_limit(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_ms: default_weather_timeout(),
            units: default_units(),
        }
    }
}

impl Default for TextGenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_text_generation_base_url(),
            model: default_text_generation_model(),
            timeout_ms: default_text_generation_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            context_race_ms: default_context_race(),
            story_race_ms: default_story_race(),
            section_race_ms: default_section_race(),
            climate_race_ms: default_climate_race(),
        }
    }
}

impl Config {
    /// Load configuration from the default location (~/.storymap/config.toml)
    ///
    /// If the configuration file doesn't exist, writes a default
    /// configuration there first.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file cannot be read or written
    /// - TOML parsing fails
    /// - Validation fails
    pub fn load_or_create() -> Result<Self, EngineError> {
        let config_path = Self::default_config_path()?;

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            Self::create_default(&config_path)
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, EngineError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml_str(&contents)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, EngineError> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Create default configuration and save to path
    fn create_default(path: &Path) -> Result<Self, EngineError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let config = Self::default();
        config.validate()?;

        let toml_string = toml::to_string_pretty(&config)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)?;

        tracing::info!("Wrote default configuration to {:?}", path);

        Ok(config)
    }

    /// Get the default configuration file path (~/.storymap/config.toml)
    fn default_config_path() -> Result<PathBuf, EngineError> {
        let home = dirs::home_dir().ok_or(EngineError::HomeDirUnavailable)?;

        Ok(home.join(".storymap").join("config.toml"))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The log level is unknown
    /// - A base URL is empty
    /// - Any timeout or race budget is zero
    /// - A race budget is longer than an adapter timeout it wraps
    /// - Sampling parameters are out of range
    pub fn validate(&self) -> Result<(), EngineError> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.core.log_level.as_str()) {
            return Err(EngineError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.core.log_level,
                valid_log_levels.join(", ")
            )));
        }

        let providers = &self.providers;
        for (name, url) in [
            ("providers.search.base_url", &providers.search.base_url),
            (
                "providers.recommendation.base_url",
                &providers.recommendation.base_url,
            ),
            ("providers.weather.base_url", &providers.weather.base_url),
            (
                "providers.text_generation.base_url",
                &providers.text_generation.base_url,
            ),
        ] {
            if url.trim().is_empty() {
                return Err(EngineError::Config(format!("{} must not be empty", name)));
            }
        }

        let budgets = [
            (
                "providers.search.location_timeout_ms",
                providers.search.location_timeout_ms,
            ),
            (
                "providers.search.culture_timeout_ms",
                providers.search.culture_timeout_ms,
            ),
            (
                "providers.search.context_timeout_ms",
                providers.search.context_timeout_ms,
            ),
            (
                "providers.search.climate_timeout_ms",
                providers.search.climate_timeout_ms,
            ),
            (
                "providers.recommendation.timeout_ms",
                providers.recommendation.timeout_ms,
            ),
            ("providers.weather.timeout_ms", providers.weather.timeout_ms),
            (
                "providers.text_generation.timeout_ms",
                providers.text_generation.timeout_ms,
            ),
            (
                "orchestrator.context_race_ms",
                self.orchestrator.context_race_ms,
            ),
            ("orchestrator.story_race_ms", self.orchestrator.story_race_ms),
            (
                "orchestrator.section_race_ms",
                self.orchestrator.section_race_ms,
            ),
            (
                "orchestrator.climate_race_ms",
                self.orchestrator.climate_race_ms,
            ),
        ];
        for (name, value) in budgets {
            if value == 0 {
                return Err(EngineError::Config(format!("{} must be positive", name)));
            }
        }

        let races: [(&str, u64, &[(&str, u64)]); 3] = [
            (
                "orchestrator.context_race_ms",
                self.orchestrator.context_race_ms,
                &[(
                    "providers.search.context_timeout_ms",
                    providers.search.context_timeout_ms,
                )],
            ),
            (
                "orchestrator.section_race_ms",
                self.orchestrator.section_race_ms,
                &[
                    (
                        "providers.search.culture_timeout_ms",
                        providers.search.culture_timeout_ms,
                    ),
                    (
                        "providers.recommendation.timeout_ms",
                        providers.recommendation.timeout_ms,
                    ),
                ],
            ),
            (
                "orchestrator.climate_race_ms",
                self.orchestrator.climate_race_ms,
                &[
                    (
                        "providers.search.climate_timeout_ms",
                        providers.search.climate_timeout_ms,
                    ),
                    ("providers.weather.timeout_ms", providers.weather.timeout_ms),
                ],
            ),
        ];
        for (race, budget, wrapped) in races {
            for (timeout, limit) in wrapped {
                if budget > *limit {
                    return Err(EngineError::Config(format!(
                        "{} ({}) must not exceed {} ({})",
                        race, budget, timeout, limit
                    )));
                }
            }
        }

        let generation = &providers.text_generation;
        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(EngineError::Config(
                "providers.text_generation.temperature must be between 0.0 and 2.0".to_string(),
            ));
        }
        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(EngineError::Config(
                "providers.text_generation.top_p must be in (0.0, 1.0]".to_string(),
            ));
        }
        if generation.model.trim().is_empty() {
            return Err(EngineError::Config(
                "providers.text_generation.model must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
