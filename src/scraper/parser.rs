use scraper::{Html, Selector};
use tracing::info;

use crate::app::Result;
use crate::domain::MovieRecord;
use crate::scraper::fields::{selector_for, FieldExtractor};
use crate::scraper::ScraperConfig;

/// Turns a rendered listing page into movie records in document order
pub struct ListingParser {
    entry: Selector,
    extractor: FieldExtractor,
}

impl ListingParser {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            entry: selector_for(&config.selectors.entry)?,
            extractor: FieldExtractor::new(config)?,
        })
    }

    /// Parse every listing entry, keeping only those with a native title
    pub fn parse(&self, html: &str) -> Vec<MovieRecord> {
        let document = Html::parse_document(html);

        let movies: Vec<MovieRecord> = document
            .select(&self.entry)
            .map(|entry| self.extractor.extract(entry))
            .filter(MovieRecord::has_title)
            .collect();

        let with_poster = movies.iter().filter(|m| m.has_poster()).count();
        info!(
            "Parsed {} movies, {} with a poster image",
            movies.len(),
            with_poster
        );

        movies
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Listing entry markup as served by the chart page
    pub(crate) fn entry_html(title: Option<&str>, poster: Option<&str>) -> String {
        let title = title
            .map(|t| format!(r#"<h2 class="detailListItem-title">{t}</h2>"#))
            .unwrap_or_default();
        let poster = poster
            .map(|p| {
                format!(
                    r#"<figure class="detailListItem-posterImage" style="background-image: url('{p}')"></figure>"#
                )
            })
            .unwrap_or_default();
        format!(r#"<li class="detailList-item">{poster}{title}</li>"#)
    }

    pub(crate) fn listing_html(entries: &[String]) -> String {
        format!(
            r#"<!DOCTYPE html><html><body><ul class="detailList">{}</ul></body></html>"#,
            entries.concat()
        )
    }

    fn parser() -> ListingParser {
        ListingParser::new(&ScraperConfig::default()).unwrap()
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let html = listing_html(&[
            entry_html(Some("第一名"), Some("https://a.example/1.jpg")),
            entry_html(Some("第二名"), None),
            entry_html(Some("第三名"), Some("https://a.example/3.jpg")),
        ]);
        let movies = parser().parse(&html);

        let titles: Vec<_> = movies.iter().map(|m| m.display_title()).collect();
        assert_eq!(titles, vec!["第一名", "第二名", "第三名"]);
        assert_eq!(movies[1].poster_url, None);
    }

    #[test]
    fn test_parse_drops_entries_without_title() {
        let html = listing_html(&[
            entry_html(None, Some("https://a.example/0.jpg")),
            entry_html(Some("有片名"), None),
            entry_html(Some(""), None),
        ]);
        let movies = parser().parse(&html);

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title_native.as_deref(), Some("有片名"));
    }

    #[test]
    fn test_parse_ignores_other_list_items() {
        let html = r#"<html><body><ul>
            <li class="navItem"><h2 class="detailListItem-title">導覽</h2></li>
            <li class="detailList-item"><h2 class="detailListItem-title">電影</h2></li>
        </ul></body></html>"#;
        let movies = parser().parse(html);

        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].display_title(), "電影");
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parser().parse("").is_empty());
        assert!(parser().parse("<html><body></body></html>").is_empty());
    }
}
