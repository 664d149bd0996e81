//! English vocabulary lessons generated by a chat-completion model.
//!
//! ```text
//! prompt → TextGenerator → ModelReply → recover_object → VocabularyRecord → word card
//! ```
//!
//! Every failure between the model call and the record (transport error,
//! prose around the JSON, no JSON at all) ends in
//! [`VocabularyRecord::fallback`], so a card is always produced.

mod audio;
mod config;
mod groq;
mod prompt;

pub use audio::{audio_url, TTS_ENDPOINT};
pub use config::VocabularyConfig;
pub use groq::GroqClient;
pub use prompt::WORD_LESSON_PROMPT;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::app::Result;
use crate::domain::VocabularyRecord;
use crate::flex::{word_message, Message};

/// A model reply in one of the shapes a generator may hand back
#[derive(Debug, Clone, PartialEq)]
pub enum ModelReply {
    /// Raw reply string
    Plain(String),
    /// Text content of a chat message
    Text(String),
    /// Reply already decoded as JSON
    Structured(Value),
}

impl From<String> for ModelReply {
    fn from(s: String) -> Self {
        ModelReply::Plain(s)
    }
}

impl From<&str> for ModelReply {
    fn from(s: &str) -> Self {
        ModelReply::Plain(s.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecoveryError {
    #[error("no JSON object found in reply")]
    NoObject,

    #[error("reply JSON is not an object")]
    NotAnObject,

    #[error("invalid JSON in reply: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recover the JSON object carried by a model reply.
///
/// Text replies are parsed directly first; failing that, the outermost
/// `{...}` span (first `{` to last `}`) is parsed.
pub fn recover_object(reply: ModelReply) -> std::result::Result<Map<String, Value>, RecoveryError> {
    match reply {
        ModelReply::Plain(text) | ModelReply::Text(text) => {
            debug!("Recovering JSON from reply: {}", preview(&text));
            recover_from_text(&text)
        }
        ModelReply::Structured(Value::Object(map)) => Ok(map),
        ModelReply::Structured(_) => Err(RecoveryError::NotAnObject),
    }
}

fn recover_from_text(text: &str) -> std::result::Result<Map<String, Value>, RecoveryError> {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return Ok(map);
    }

    let start = text.find('{').ok_or(RecoveryError::NoObject)?;
    let end = text.rfind('}').ok_or(RecoveryError::NoObject)?;
    if end < start {
        return Err(RecoveryError::NoObject);
    }

    match serde_json::from_str::<Value>(&text[start..=end])? {
        Value::Object(map) => Ok(map),
        _ => Err(RecoveryError::NotAnObject),
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(200) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Trait for text generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` within the conversation identified by `session_id`
    async fn generate(&self, session_id: &str, prompt: &str) -> Result<ModelReply>;
}

/// Produces vocabulary lessons for a chat user
#[derive(Clone)]
pub struct VocabularyLesson {
    generator: Arc<dyn TextGenerator>,
}

impl VocabularyLesson {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Ask the model for a lesson; falls back to a fixed record on any failure
    pub async fn record(&self, session_id: &str) -> VocabularyRecord {
        let reply = match self.generator.generate(session_id, WORD_LESSON_PROMPT).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Text generation failed: {}", e);
                return VocabularyRecord::fallback();
            }
        };

        match recover_object(reply) {
            Ok(object) => VocabularyRecord::from_object(&object),
            Err(e) => {
                error!("Failed to parse response as JSON: {}", e);
                VocabularyRecord::fallback()
            }
        }
    }

    /// Lesson rendered as a flex message
    pub async fn message(&self, session_id: &str) -> Message {
        word_message(&self.record(session_id).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::MarqueeError;
    use serde_json::json;

    const FULL_OBJECT: &str = r#"{"word":"x","pronunciation":"/x/","part_of_speech":"noun","definition_en":"a letter","definition_zh":"字母","example_sentence":"X marks the spot.","example_translation":"X 標記位置。"}"#;

    struct CannedGenerator(std::result::Result<ModelReply, String>);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(&self, _session_id: &str, prompt: &str) -> Result<ModelReply> {
            assert!(prompt.contains("example_translation"));
            self.0.clone().map_err(MarqueeError::Generation)
        }
    }

    fn lesson(reply: std::result::Result<ModelReply, String>) -> VocabularyLesson {
        VocabularyLesson::new(Arc::new(CannedGenerator(reply)))
    }

    #[test]
    fn test_recover_direct_json() {
        let map = recover_object(ModelReply::Text(FULL_OBJECT.into())).unwrap();
        assert_eq!(map["word"], "x");
    }

    #[test]
    fn test_recover_embedded_object_exactly() {
        let reply = format!("noise {} noise", FULL_OBJECT);
        let map = recover_object(reply.into()).unwrap();
        let expected: Value = serde_json::from_str(FULL_OBJECT).unwrap();
        assert_eq!(Value::Object(map), expected);
    }

    #[test]
    fn test_recover_multiline_fenced_reply() {
        let reply = "Here you go:\n```json\n{\n  \"word\": \"negotiate\",\n  \"part_of_speech\": \"verb\"\n}\n```";
        let map = recover_object(reply.into()).unwrap();
        assert_eq!(map["word"], "negotiate");
    }

    #[test]
    fn test_recover_garbage_fails() {
        assert!(matches!(
            recover_object("no braces here".into()),
            Err(RecoveryError::NoObject)
        ));
        assert!(matches!(
            recover_object("} backwards {".into()),
            Err(RecoveryError::NoObject)
        ));
        assert!(matches!(
            recover_object("{ not json }".into()),
            Err(RecoveryError::Json(_))
        ));
    }

    #[test]
    fn test_recover_structured() {
        let map = recover_object(ModelReply::Structured(json!({ "word": "y" }))).unwrap();
        assert_eq!(map["word"], "y");
        assert!(matches!(
            recover_object(ModelReply::Structured(json!(["word"]))),
            Err(RecoveryError::NotAnObject)
        ));
    }

    #[tokio::test]
    async fn test_lesson_uses_embedded_object() {
        let reply = format!("noise {} noise", FULL_OBJECT);
        let record = lesson(Ok(ModelReply::Plain(reply))).record("user-1").await;
        assert_eq!(record.word, "x");
        assert_eq!(record.example_translation, "X 標記位置。");
    }

    #[tokio::test]
    async fn test_lesson_falls_back_on_garbage() {
        let record = lesson(Ok("garbage".into())).record("user-1").await;
        assert_eq!(record, VocabularyRecord::fallback());
        assert_eq!(record.word, "fallback");
    }

    #[tokio::test]
    async fn test_lesson_falls_back_on_transport_error() {
        let record = lesson(Err("connection reset".into())).record("user-1").await;
        assert_eq!(record.word, "fallback");
    }

    #[test]
    fn test_lesson_fills_missing_fields() {
        let generator = lesson(Ok(ModelReply::Structured(json!({ "word": "brief" }))));
        let message = tokio_test::block_on(generator.message("user-2"));

        assert_eq!(message.alt_text(), Some("英文單字：brief"));
    }
}
