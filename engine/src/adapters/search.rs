//! Tavily search/answer adapter
//!
//! One `POST {base_url}/search` per call, credential in the JSON body.
//! The response must carry a `results` array; anything else fails closed.

use super::{ensure_success, settle, AdapterError, AdapterResult, Provider, SearchProvider};
use crate::config::SearchConfig;
use crate::secrets::SecretString;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// How thoroughly the provider should search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
    Basic,
    Advanced,
}

impl SearchDepth {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Advanced => "advanced",
        }
    }
}

/// A single search call
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub query: String,
    pub depth: SearchDepth,
    pub max_results: u32,
    pub timeout: Duration,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, timeout: Duration) -> Self {
        Self {
            query: query.into(),
            depth: SearchDepth::Basic,
            max_results: 3,
            timeout,
        }
    }

    pub fn depth(mut self, depth: SearchDepth) -> Self {
        self.depth = depth;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }
}

/// One hit from the provider. Individual fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearchHit {
    /// Non-blank content, if any
    pub fn text(&self) -> Option<&str> {
        self.content
            .as_deref()
            .map(str::trim)
            .filter(|content| !content.is_empty())
    }
}

/// Normalized search response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOutcome {
    /// The provider's synthesized answer
    pub answer: Option<String>,
    pub results: Vec<SearchHit>,
}

impl SearchOutcome {
    /// The answer if present, otherwise the first hit's content
    pub fn best_text(&self) -> Option<&str> {
        self.answer
            .as_deref()
            .map(str::trim)
            .filter(|answer| !answer.is_empty())
            .or_else(|| self.results.iter().find_map(SearchHit::text))
    }
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    results: Vec<SearchHit>,
}

pub struct TavilyAdapter {
    config: SearchConfig,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl TavilyAdapter {
    pub fn new(config: SearchConfig, api_key: Option<SecretString>) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, request: &SearchRequest) -> Result<SearchOutcome, AdapterError> {
        let api_key = self.api_key.as_ref().ok_or(AdapterError::NotConfigured)?;

        let url = format!("{}/search", self.config.base_url.trim_end_matches('/'));

        tracing::debug!(
            "Tavily search ({}, max {}): {}",
            request.depth.as_str(),
            request.max_results,
            request.query
        );

        let payload = json!({
            "api_key": api_key.unsecure(),
            "query": request.query,
            "search_depth": request.depth.as_str(),
            "include_answer": true,
            "include_images": false,
            "include_raw_content": false,
            "max_results": request.max_results,
        });

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(request.timeout)
            .send()
            .await?;

        let data: TavilyResponse = ensure_success(response)?
            .json()
            .await
            .map_err(AdapterError::from)?;

        let outcome = SearchOutcome {
            answer: data.answer.filter(|answer| !answer.trim().is_empty()),
            results: data.results,
        };

        if outcome.answer.is_none() && outcome.results.is_empty() {
            return Err(AdapterError::Empty);
        }

        Ok(outcome)
    }
}

#[async_trait]
impl SearchProvider for TavilyAdapter {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, request: &SearchRequest) -> AdapterResult<SearchOutcome> {
        settle(Provider::Search, self.fetch(request).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_text_prefers_answer() {
        let outcome = SearchOutcome {
            answer: Some("Answer".to_string()),
            results: vec![SearchHit {
                content: Some("Hit".to_string()),
                ..Default::default()
            }],
        };
        assert_eq!(outcome.best_text(), Some("Answer"));
    }

    #[test]
    fn test_best_text_skips_blank_hits() {
        let outcome = SearchOutcome {
            answer: Some("  ".to_string()),
            results: vec![
                SearchHit::default(),
                SearchHit {
                    content: Some("Second".to_string()),
                    ..Default::default()
                },
            ],
        };
        assert_eq!(outcome.best_text(), Some("Second"));
    }

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new("Perth", Duration::from_secs(1))
            .depth(SearchDepth::Advanced)
            .max_results(5);
        assert_eq!(request.depth, SearchDepth::Advanced);
        assert_eq!(request.max_results, 5);
    }

    #[tokio::test]
    async fn test_unconfigured_returns_none_without_network() {
        let adapter = TavilyAdapter::new(
            SearchConfig {
                base_url: "http://127.0.0.1:9".to_string(),
                ..Default::default()
            },
            None,
        );
        assert!(!adapter.is_configured());
        let request = SearchRequest::new("Perth", Duration::from_millis(50));
        assert!(adapter.search(&request).await.is_none());
    }
}
