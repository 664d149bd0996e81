use tracing::error;

use crate::domain::VocabularyRecord;
use crate::flex::{
    Action, BoxComponent, Bubble, ButtonComponent, Component, FlexContainer, Message,
    TextComponent,
};
use crate::vocabulary::audio_url;

/// Build the vocabulary card. Never fails: an audio button whose link
/// cannot be built is left out.
pub fn word_bubble(word: &VocabularyRecord) -> Bubble {
    let header = BoxComponent::vertical(vec![TextComponent::new("📖英文單字")
        .bold()
        .size("lg")
        .into()]);

    let body = BoxComponent::vertical(vec![
        TextComponent::new(format!("📚 {} ({})", word.word, word.part_of_speech))
            .bold()
            .size("xl")
            .wrap()
            .into(),
        TextComponent::new(format!("🔊 {}", word.pronunciation))
            .size("md")
            .color("#888888")
            .wrap()
            .into(),
        TextComponent::new(format!("💡 英文解釋: {}", word.definition_en))
            .size("sm")
            .color("#555555")
            .wrap()
            .into(),
        TextComponent::new(format!("📘 中文解釋: {}", word.definition_zh))
            .size("sm")
            .color("#555555")
            .wrap()
            .into(),
        TextComponent::new("✏️ 例句:").bold().size("sm").wrap().into(),
        TextComponent::new(format!("● {}", word.example_sentence))
            .size("sm")
            .color("#333333")
            .wrap()
            .into(),
        TextComponent::new(format!("○ {}", word.example_translation))
            .size("sm")
            .color("#666666")
            .wrap()
            .into(),
    ])
    .spacing("md");

    let buttons: Vec<Component> = [
        ("🔊 單字發音", &word.word, "primary", "#00C300"),
        ("🔊 例句發音", &word.example_sentence, "secondary", "#1E90FF"),
    ]
    .into_iter()
    .filter_map(|(label, text, style, color)| {
        match Action::uri(label, &audio_url(text)) {
            Ok(action) => Some(Component::from(
                ButtonComponent::new(action).style(style).color(color),
            )),
            Err(e) => {
                error!("Skipping '{}' button: {}", label, e);
                None
            }
        }
    })
    .collect();

    let footer: Option<Component> = (!buttons.is_empty())
        .then(|| BoxComponent::vertical(buttons).spacing("sm").into());

    Bubble {
        header: Some(header.into()),
        hero: None,
        body: Some(body.into()),
        footer,
    }
}

/// Flex message carrying the vocabulary card
pub fn word_message(word: &VocabularyRecord) -> Message {
    Message::flex(
        format!("英文單字：{}", word.word),
        FlexContainer::Bubble(word_bubble(word)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn footer_labels(bubble: &Bubble) -> Vec<String> {
        let Some(Component::Box(footer)) = &bubble.footer else {
            return Vec::new();
        };
        footer
            .contents
            .iter()
            .filter_map(|c| match c {
                Component::Button(ButtonComponent {
                    action: Action::Uri { label, .. },
                    ..
                }) => Some(label.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_word_message_alt_text() {
        let message = word_message(&VocabularyRecord::fallback());
        assert_eq!(message.alt_text(), Some("英文單字：fallback"));
    }

    #[test]
    fn test_word_bubble_layout() {
        let bubble = word_bubble(&VocabularyRecord::fallback());

        let Some(Component::Box(body)) = &bubble.body else {
            panic!("body is not a box");
        };
        assert_eq!(body.contents.len(), 7);
        let Component::Text(first) = &body.contents[0] else {
            panic!("first body row is not text");
        };
        assert_eq!(first.text, "📚 fallback (noun)");
        assert_eq!(footer_labels(&bubble), vec!["🔊 單字發音", "🔊 例句發音"]);
    }

    #[test]
    fn test_empty_fields_drop_audio_buttons() {
        let bubble = word_bubble(&VocabularyRecord::default());
        assert!(bubble.footer.is_none());

        let word = VocabularyRecord {
            word: "serendipity".into(),
            ..Default::default()
        };
        assert_eq!(footer_labels(&word_bubble(&word)), vec!["🔊 單字發音"]);
    }
}
