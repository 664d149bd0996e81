use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::debug;

use crate::app::{MarqueeError, Result};
use crate::vocabulary::{ModelReply, TextGenerator, VocabularyConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }

    fn assistant(content: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Chat-completion client for Groq's OpenAI-compatible API.
///
/// Keeps a short in-memory history per session so consecutive requests
/// from the same user share context.
pub struct GroqClient {
    client: Client,
    config: VocabularyConfig,
    api_key: String,
    history: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl GroqClient {
    pub fn new(config: VocabularyConfig, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            config,
            api_key,
            history: Mutex::new(HashMap::new()),
        })
    }

    /// Create a client reading its key from the configured environment variable
    pub fn from_env(config: VocabularyConfig) -> Result<Self> {
        let api_key = config.api_key().ok_or_else(|| {
            MarqueeError::Config(format!("{} is not set", config.api_key_env))
        })?;
        Self::new(config, api_key)
    }

    async fn remember(&self, session_id: &str, prompt: &str, answer: &str) {
        let mut history = self.history.lock().await;
        let messages = history.entry(session_id.to_string()).or_default();
        messages.push(ChatMessage::user(prompt));
        messages.push(ChatMessage::assistant(answer));

        let excess = messages.len().saturating_sub(self.config.max_history);
        messages.drain(..excess);
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn generate(&self, session_id: &str, prompt: &str) -> Result<ModelReply> {
        let mut messages = {
            let history = self.history.lock().await;
            history.get(session_id).cloned().unwrap_or_default()
        };
        messages.push(ChatMessage::user(prompt));

        let request = CompletionRequest {
            model: &self.config.model,
            messages: &messages,
            temperature: self.config.temperature,
            response_format: self
                .config
                .json_mode
                .then(|| json!({ "type": "json_object" })),
        };

        let url = format!(
            "{}/chat/completions",
            self.config.api_base.trim_end_matches('/')
        );
        debug!("Requesting completion from {} ({} messages)", url, messages.len());

        let response: CompletionResponse = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| MarqueeError::Generation("Completion had no choices".to_string()))?;

        self.remember(session_id, prompt, &content).await;

        if self.config.json_mode {
            if let Ok(value) = serde_json::from_str::<Value>(&content) {
                return Ok(ModelReply::Structured(value));
            }
        }

        Ok(ModelReply::Text(content))
    }
}
