use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the vocabulary text generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// OpenAI-compatible API root (default: Groq)
    pub api_base: String,

    pub model: String,

    /// Environment variable holding the API key (default: GROQ_API_KEY)
    pub api_key_env: String,

    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// Messages kept per session for conversational context (default: 10)
    pub max_history: usize,

    /// Ask the model for a JSON object response (default: false)
    pub json_mode: bool,

    pub temperature: f32,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            api_key_env: "GROQ_API_KEY".to_string(),
            timeout_secs: 30,
            max_history: 10,
            json_mode: false,
            temperature: 0.7,
        }
    }
}

impl VocabularyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}
