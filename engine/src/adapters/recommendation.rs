//! TasteDive similar-items adapter

use super::{
    ensure_success, settle, truncate_with_ellipsis, AdapterError, AdapterResult, Provider,
    RecommendationProvider,
};
use crate::config::RecommendationConfig;
use crate::secrets::SecretString;
use async_trait::async_trait;
use sdk::{DataSource, RecommendationRecord};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = "StoryMap.ai/1.0";
const MAX_TEASER_CHARS: usize = 300;

/// Category of items to look up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarKind {
    Music,
    Movies,
}

impl SimilarKind {
    fn as_param(&self) -> &'static str {
        match self {
            Self::Music => "music",
            Self::Movies => "movies",
        }
    }

    fn default_category(&self) -> &'static str {
        match self {
            Self::Music => "Music",
            Self::Movies => "Movie",
        }
    }

    fn default_description(&self, subject: &str) -> String {
        match self {
            Self::Music => format!("Musical artist recommended for {}", subject),
            Self::Movies => format!("Film recommendation for {}", subject),
        }
    }
}

/// A single similar-items call
#[derive(Debug, Clone)]
pub struct SimilarRequest {
    /// Free-text query, e.g. `"Hobart Australia music"`
    pub query: String,
    /// Location the query is about, used in default descriptions
    pub subject: String,
    pub kind: SimilarKind,
    pub limit: u32,
    /// Ask the provider for descriptive teasers
    pub info: bool,
}

#[derive(Deserialize)]
struct TasteDiveResponse {
    #[serde(rename = "Similar")]
    similar: TasteDiveSimilar,
}

#[derive(Deserialize)]
struct TasteDiveSimilar {
    #[serde(rename = "Results")]
    results: Vec<TasteDiveItem>,
}

#[derive(Deserialize)]
struct TasteDiveItem {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type", default)]
    kind: Option<String>,
    #[serde(rename = "wTeaser", default)]
    teaser: Option<String>,
    #[serde(rename = "wUrl", default)]
    url: Option<String>,
}

pub struct TasteDiveAdapter {
    config: RecommendationConfig,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl TasteDiveAdapter {
    pub fn new(config: RecommendationConfig, api_key: Option<SecretString>) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(
        &self,
        request: &SimilarRequest,
    ) -> Result<Vec<RecommendationRecord>, AdapterError> {
        let api_key = self.api_key.as_ref().ok_or(AdapterError::NotConfigured)?;

        let url = format!("{}/similar", self.config.base_url.trim_end_matches('/'));
        let limit = request.limit.to_string();

        tracing::debug!(
            "TasteDive lookup ({}, limit {}): {}",
            request.kind.as_param(),
            request.limit,
            request.query
        );

        let mut params = vec![
            ("q", request.query.as_str()),
            ("type", request.kind.as_param()),
            ("limit", limit.as_str()),
            ("k", api_key.unsecure()),
        ];
        if request.info {
            params.push(("info", "1"));
        }

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await?;

        let data: TasteDiveResponse = ensure_success(response)?.json().await?;

        let records: Vec<RecommendationRecord> = data
            .similar
            .results
            .into_iter()
            .filter(|item| !item.name.trim().is_empty())
            .map(|item| RecommendationRecord {
                description: item
                    .teaser
                    .filter(|teaser| !teaser.trim().is_empty())
                    .map(|teaser| truncate_with_ellipsis(teaser.trim(), MAX_TEASER_CHARS))
                    .unwrap_or_else(|| request.kind.default_description(&request.subject)),
                category: item
                    .kind
                    .filter(|kind| !kind.is_empty())
                    .unwrap_or_else(|| request.kind.default_category().to_string()),
                name: item.name,
                url: item.url.filter(|url| !url.is_empty()),
                data_source: DataSource::live(Provider::Recommendation.label()),
            })
            .collect();

        if records.is_empty() {
            return Err(AdapterError::Empty);
        }

        Ok(records)
    }
}

#[async_trait]
impl RecommendationProvider for TasteDiveAdapter {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn similar(&self, request: &SimilarRequest) -> AdapterResult<Vec<RecommendationRecord>> {
        settle(Provider::Recommendation, self.fetch(request).await)
    }
}
