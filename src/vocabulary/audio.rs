/// Text-to-speech endpoint; the percent-encoded text is appended
pub const TTS_ENDPOINT: &str =
    "https://translate.google.com/translate_tts?ie=UTF-8&tl=en&client=tw-ob&q=";

/// Link that speaks `text` aloud, or an empty string for empty text
pub fn audio_url(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("{}{}", TTS_ENDPOINT, urlencoding::encode(text))
}
