//! Groq (OpenAI-compatible) chat completion adapter

use super::{ensure_success, settle, AdapterError, AdapterResult, Provider, TextGenerator};
use crate::config::TextGenerationConfig;
use crate::secrets::SecretString;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::time::Duration;

/// Message in a completion request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    System,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::System => write!(f, "system"),
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

pub struct GroqAdapter {
    config: TextGenerationConfig,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl GroqAdapter {
    pub fn new(config: TextGenerationConfig, api_key: Option<SecretString>) -> Self {
        Self {
            config,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, messages: &[Message]) -> Result<String, AdapterError> {
        let api_key = self.api_key.as_ref().ok_or(AdapterError::NotConfigured)?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let api_messages: Vec<_> = messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role.to_string(),
                    "content": msg.content
                })
            })
            .collect();

        let payload = json!({
            "model": self.config.model,
            "messages": api_messages,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "top_p": self.config.top_p,
        });

        tracing::debug!(
            "Sending {} messages to {} ({})",
            messages.len(),
            self.config.model,
            url
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", api_key.unsecure()))
            .json(&payload)
            .timeout(Duration::from_millis(self.config.timeout_ms))
            .send()
            .await?;

        let data: CompletionResponse = ensure_success(response)?.json().await?;

        let content = data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AdapterError::Parse("No choices in response".to_string()))?
            .message
            .content
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AdapterError::Empty)?;

        tracing::debug!("Generated {} characters", content.chars().count());

        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for GroqAdapter {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, messages: &[Message]) -> AdapterResult<String> {
        settle(Provider::TextGeneration, self.fetch(messages).await)
    }
}
