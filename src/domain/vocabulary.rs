use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// Keys every vocabulary lesson carries, in display order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "word",
    "pronunciation",
    "part_of_speech",
    "definition_en",
    "definition_zh",
    "example_sentence",
    "example_translation",
];

/// A single English vocabulary lesson.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyRecord {
    pub word: String,
    pub pronunciation: String,
    pub part_of_speech: String,
    pub definition_en: String,
    pub definition_zh: String,
    pub example_sentence: String,
    pub example_translation: String,
}

impl VocabularyRecord {
    /// Substituted whenever the model reply cannot be recovered.
    pub fn fallback() -> Self {
        Self {
            word: "fallback".into(),
            pronunciation: "/ˈfɔːlbæk/".into(),
            part_of_speech: "noun".into(),
            definition_en: "something or someone to turn to in case of failure or emergency"
                .into(),
            definition_zh: "備用方案、後備選擇".into(),
            example_sentence: "We need a fallback plan in case this doesn't work.".into(),
            example_translation: "我們需要一個備用計劃，以防這個不起作用。".into(),
        }
    }

    /// Build a record from a recovered JSON object.
    ///
    /// Missing keys become empty strings and are logged. Non-string scalars
    /// are kept in their JSON text form.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        let field = |name: &str| -> String {
            match object.get(name) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) => String::new(),
                Some(other) => other.to_string(),
                None => {
                    warn!("Missing '{}' field in word data. Set to empty string.", name);
                    String::new()
                }
            }
        };

        Self {
            word: field("word"),
            pronunciation: field("pronunciation"),
            part_of_speech: field("part_of_speech"),
            definition_en: field("definition_en"),
            definition_zh: field("definition_zh"),
            example_sentence: field("example_sentence"),
            example_translation: field("example_translation"),
        }
    }
}
