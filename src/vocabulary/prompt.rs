pub const WORD_LESSON_PROMPT: &str = r#"請提供一個英文單字的學習內容，包含以下欄位：

1. 單字 (word)
2. 發音（使用台灣常見的 KK 音標）(pronunciation)
3. 詞性 (part_of_speech)
4. 英文解釋 (definition_en)
5. 中文解釋 (definition_zh)
6. 例句 (example_sentence)
7. 例句翻譯 (example_translation)

請選擇難度符合台灣常見的「三千單」詞彙等級（如全民英檢中級、CEFR B1 級）的單字，應為日常生活中常見且實用的詞彙，能夠提升口說與寫作能力，適用於一般對話或正式場合。

請以 **純 JSON 格式** 回覆，**不要添加多餘說明或文字**，並請確認所有資訊準確無誤。

以下為格式範例：
{
  "word": "negotiate",
  "pronunciation": "/nɪˈɡoʊʃiˌeɪt/",
  "part_of_speech": "verb",
  "definition_en": "to discuss something formally in order to reach an agreement",
  "definition_zh": "協商、談判",
  "example_sentence": "We need to negotiate a better deal with the supplier.",
  "example_translation": "我們需要與供應商協商更好的條件。"
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::REQUIRED_FIELDS;

    #[test]
    fn test_prompt_names_every_field() {
        for field in REQUIRED_FIELDS {
            assert!(WORD_LESSON_PROMPT.contains(field), "prompt lacks {field}");
        }
    }
}
