use serde::{Deserialize, Serialize};

/// One entry of the trending chart as scraped from the listing page.
///
/// Every field except `title_native` is optional; a missing value is `None`,
/// never a placeholder string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_native: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification: Option<String>,
    /// Normalized to `<h>小時<m>分`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Normalized to `上映<n>週` or `上映<n>天`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_window: Option<String>,
    /// Genre tokens joined with ` • `
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

impl MovieRecord {
    pub fn new(title_native: impl Into<String>) -> Self {
        Self {
            title_native: Some(title_native.into()),
            ..Default::default()
        }
    }

    /// Records without a native title are dropped by the parser.
    pub fn has_title(&self) -> bool {
        self.title_native.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn has_poster(&self) -> bool {
        self.poster_url.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn display_title(&self) -> &str {
        self.title_native
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("未知電影")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_title_fallback() {
        let record = MovieRecord::default();
        assert_eq!(record.display_title(), "未知電影");

        let record = MovieRecord {
            title_native: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(record.display_title(), "未知電影");
        assert!(!record.has_title());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let record = MovieRecord::new("沙丘");
        let json = serde_json::to_value(&record).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["title_native"], "沙丘");
    }

    #[test]
    fn test_has_poster_ignores_empty_url() {
        let mut record = MovieRecord::new("沙丘");
        assert!(!record.has_poster());
        record.poster_url = Some(String::new());
        assert!(!record.has_poster());
        record.poster_url = Some("https://example.com/p.jpg".into());
        assert!(record.has_poster());
    }
}
