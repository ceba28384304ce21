//! External Service Adapters
//!
//! One adapter per third-party API (search/answer, recommendation, weather,
//! text generation). Each adapter builds a single provider-specific request,
//! applies a per-call timeout, and maps the response into a normalized shape.
//!
//! Adapters never let an error escape: internally they work with
//! `Result<T, AdapterError>`, and at their public boundary [`settle`] turns
//! every failure into `None`, which tells the caller to use fallback
//! content. There are no retries; the orchestrator decides what to do next.

use async_trait::async_trait;
use sdk::{LocationQuery, RecommendationRecord, WeatherRecord};
use std::fmt;

use crate::secrets::scrub_secrets;

pub mod recommendation;
pub mod search;
pub mod text_generation;
pub mod weather;

pub use recommendation::{SimilarKind, SimilarRequest, TasteDiveAdapter};
pub use search::{SearchDepth, SearchHit, SearchOutcome, SearchRequest, TavilyAdapter};
pub use text_generation::{GroqAdapter, Message, MessageRole};
pub use weather::OpenWeatherAdapter;

/// Outcome of an adapter call: `None` strictly means "no usable data,
/// substitute fallback content".
pub type AdapterResult<T> = Option<T>;

/// The external services the engine talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Search,
    Recommendation,
    Weather,
    TextGeneration,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Self::Search,
        Self::Recommendation,
        Self::Weather,
        Self::TextGeneration,
    ];

    /// Provenance label attached to records this provider produced
    pub fn label(&self) -> &'static str {
        match self {
            Self::Search => "Tavily API",
            Self::Recommendation => "TasteDive API",
            Self::Weather => "OpenWeatherMap",
            Self::TextGeneration => "Groq API",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search => write!(f, "search"),
            Self::Recommendation => write!(f, "recommendation"),
            Self::Weather => write!(f, "weather"),
            Self::TextGeneration => write!(f, "text_generation"),
        }
    }
}

/// Errors that can occur inside an adapter.
///
/// These never cross the adapter boundary; they exist so the failure can be
/// logged with a reason before it becomes `None`.
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("No credential configured")]
    NotConfigured,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout")]
    Timeout,

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Provider returned no usable data")]
    Empty,
}

impl From<reqwest::Error> for AdapterError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdapterError::Timeout
        } else if e.is_decode() {
            AdapterError::Parse(scrub_secrets(&e.to_string()))
        } else {
            AdapterError::Network(scrub_secrets(&e.to_string()))
        }
    }
}

/// Convert an adapter's internal result into an [`AdapterResult`].
///
/// Missing credentials are an expected mode and only logged at debug level;
/// every other failure is logged as a warning.
pub fn settle<T>(provider: Provider, result: Result<T, AdapterError>) -> AdapterResult<T> {
    match result {
        Ok(value) => Some(value),
        Err(AdapterError::NotConfigured) => {
            tracing::debug!("{} provider has no credential, using fallback", provider);
            None
        }
        Err(e) => {
            tracing::warn!("{} provider failed: {}", provider, e);
            None
        }
    }
}

/// Fail with [`AdapterError::Status`] unless the response is 2xx
pub(crate) fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, AdapterError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AdapterError::Status(status.as_u16()))
    }
}

/// Truncate to at most `max_chars` characters
pub fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Truncate to at most `max_chars` characters, appending `...` when
/// anything was cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        format!("{}...", truncate(text, max_chars))
    } else {
        text.to_string()
    }
}

/// Search/answer provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns true if a credential is configured
    fn is_configured(&self) -> bool;

    /// Run one search; `None` on any failure or when nothing came back
    async fn search(&self, request: &SearchRequest) -> AdapterResult<SearchOutcome>;
}

/// Similar-items recommendation provider
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    /// Returns true if a credential is configured
    fn is_configured(&self) -> bool;

    /// Look up items similar to the request's subject, in provider order
    async fn similar(&self, request: &SimilarRequest) -> AdapterResult<Vec<RecommendationRecord>>;
}

/// Current-weather provider
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Returns true if a credential is configured
    fn is_configured(&self) -> bool;

    /// Current conditions at the query's coordinates
    async fn current(&self, query: &LocationQuery) -> AdapterResult<WeatherRecord>;
}

/// Chat-completion text generator
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns true if a credential is configured
    fn is_configured(&self) -> bool;

    /// Generate a completion for the conversation
    async fn complete(&self, messages: &[Message]) -> AdapterResult<String>;
}
