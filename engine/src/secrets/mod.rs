//! Provider credentials and secret scrubbing
//!
//! Credentials are read once at start-up from the environment into an
//! immutable [`Credentials`] value. The orchestrator hands each adapter its
//! own key at construction time; nothing reads the environment afterwards.
//!
//! A missing credential is an expected mode, not an error: every call for
//! that provider goes straight to fallback content.

pub mod string;

pub use string::SecretString;

use regex::Regex;
use std::sync::OnceLock;

use crate::adapters::Provider;

/// Regex patterns for detecting credentials in free text.
/// These are compiled once and reused for performance.
static SECRET_PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();

/// Initializes and returns the secret detection patterns.
///
/// Patterns match:
/// - Query-string credentials: `api_key=`, `appid=`, `k=`
/// - JSON body credentials: `"api_key": "..."`
/// - Bearer tokens: `Bearer <token>`
/// - Tavily keys: `tvly-...`
fn get_secret_patterns() -> &'static Vec<(Regex, &'static str)> {
    SECRET_PATTERNS.get_or_init(|| {
        vec![
            (
                Regex::new(r#"\b(api_key|appid|k)=[^&\s"']+"#).expect("Invalid query pattern"),
                "$1=[REDACTED]",
            ),
            (
                Regex::new(r#""api_key"\s*:\s*"[^"]*""#).expect("Invalid JSON pattern"),
                r#""api_key":"[REDACTED]""#,
            ),
            (
                Regex::new(r"Bearer\s+[^\s]+").expect("Invalid Bearer pattern"),
                "Bearer [REDACTED]",
            ),
            (
                Regex::new(r"tvly-[a-zA-Z0-9\-_]{8,}").expect("Invalid Tavily pattern"),
                "[REDACTED]",
            ),
        ]
    })
}

/// Scrubs credentials from text by replacing them with `[REDACTED]`.
///
/// Used on every provider error message before it is logged; `reqwest`
/// errors embed the request URL, and several providers take the key as a
/// query parameter.
///
/// # Examples
/// ```
/// use storymap_engine::secrets::scrub_secrets;
///
/// let scrubbed = scrub_secrets("GET https://tastedive.com/api/similar?q=x&k=123-abc");
/// assert_eq!(scrubbed, "GET https://tastedive.com/api/similar?q=x&k=[REDACTED]");
/// ```
pub fn scrub_secrets(text: &str) -> String {
    let mut result = text.to_string();

    for (pattern, replacement) in get_secret_patterns() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }

    result
}

/// Environment variables holding each provider's credential
pub const fn env_var(provider: Provider) -> &'static str {
    match provider {
        Provider::Search => "TAVILY_API_KEY",
        Provider::Recommendation => "TASTEDIVE_API_KEY",
        Provider::Weather => "OPENWEATHER_API_KEY",
        Provider::TextGeneration => "GROQ_API_KEY",
    }
}

/// Immutable set of optional provider credentials
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    search: Option<SecretString>,
    recommendation: Option<SecretString>,
    weather: Option<SecretString>,
    text_generation: Option<SecretString>,
}

impl Credentials {
    /// No credentials at all; every provider routes to fallback content
    pub fn none() -> Self {
        Self::default()
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read credentials through an arbitrary lookup function.
    ///
    /// Blank values count as absent.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |provider: Provider| {
            lookup(env_var(provider))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .map(SecretString::new)
        };

        let credentials = Self {
            search: read(Provider::Search),
            recommendation: read(Provider::Recommendation),
            weather: read(Provider::Weather),
            text_generation: read(Provider::TextGeneration),
        };

        for provider in Provider::ALL {
            tracing::debug!(
                "Credential for {}: {}",
                provider,
                if credentials.is_configured(provider) {
                    "present"
                } else {
                    "absent, using fallback content"
                }
            );
        }

        credentials
    }

    /// Return a copy with one credential set
    pub fn with(mut self, provider: Provider, key: impl Into<String>) -> Self {
        let secret = Some(SecretString::new(key));
        match provider {
            Provider::Search => self.search = secret,
            Provider::Recommendation => self.recommendation = secret,
            Provider::Weather => self.weather = secret,
            Provider::TextGeneration => self.text_generation = secret,
        }
        self
    }

    pub fn get(&self, provider: Provider) -> Option<&SecretString> {
        match provider {
            Provider::Search => self.search.as_ref(),
            Provider::Recommendation => self.recommendation.as_ref(),
            Provider::Weather => self.weather.as_ref(),
            Provider::TextGeneration => self.text_generation.as_ref(),
        }
    }

    pub fn is_configured(&self, provider: Provider) -> bool {
        self.get(provider).is_some()
    }
}
