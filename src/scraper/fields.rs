//! Field extraction for a single listing entry.
//!
//! Each field owns an ordered list of rules. A rule reads a raw value from
//! the entry (text, nested text or an attribute) and transforms it; the
//! first rule yielding a non-empty value wins. A field with no winning rule
//! is left unset.

use regex::Regex;
use scraper::{ElementRef, Selector};
use url::Url;

use crate::app::{MarqueeError, Result};
use crate::domain::MovieRecord;
use crate::scraper::ScraperConfig;

/// Background image patterns in order of specificity
const POSTER_PATTERNS: [&str; 3] = [
    r#"(?i)background-image:\s*url\(['"]?(.*?)['"]?\)"#,
    r#"(?i)background:\s*url\(['"]?(.*?)['"]?\)"#,
    r#"(?i)url\(['"]?(.*?)['"]?\)"#,
];

const DURATION_PATTERN: &str = r"(\d+小時\d+分)";
const RELEASE_PATTERN: &str = r"上映(\d+週|\d+天)";
const GENRE_SEPARATOR: &str = r"[•\s]+";

/// Certification suffix preceding the genre list, e.g. `輔12級`
const CERTIFICATION_MARKER: char = '級';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    TitleNative,
    TitleOriginal,
    Rating,
    Certification,
    Duration,
    ReleaseWindow,
    Genre,
    Poster,
    Trailer,
}

/// Where a rule reads its raw value from
enum Source {
    /// Stripped text of the first matching descendant
    Text(Selector),
    /// Text of `target` inside the first `container`
    Nested {
        container: Selector,
        target: Selector,
    },
    /// Attribute of the first matching descendant
    Attribute { selector: Selector, name: String },
}

impl Source {
    fn read(&self, entry: ElementRef<'_>) -> Option<String> {
        match self {
            Source::Text(selector) => entry.select(selector).next().map(stripped_text),
            Source::Nested { container, target } => entry
                .select(container)
                .next()?
                .select(target)
                .next()
                .map(stripped_text),
            Source::Attribute { selector, name } => entry
                .select(selector)
                .next()?
                .value()
                .attr(name)
                .map(str::to_string),
        }
    }
}

/// How a raw value becomes a field value
enum Transform {
    Verbatim,
    /// First capture group, prefixed
    Capture {
        pattern: Regex,
        prefix: &'static str,
    },
    /// URL inside an inline style declaration
    StyleUrl(Regex),
    /// Bare image URL from a lazy-loading attribute
    ImageSource,
    /// Tokens following the certification marker, joined with ` • `
    Genre { separator: Regex },
    /// Link resolved against the site origin
    Resolve(Url),
}

impl Transform {
    fn apply(&self, raw: &str) -> Option<String> {
        match self {
            Transform::Verbatim => Some(raw.to_string()),
            Transform::Capture { pattern, prefix } => pattern
                .captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| format!("{}{}", prefix, m.as_str())),
            Transform::StyleUrl(pattern) => {
                let captured = pattern.captures(raw)?.get(1)?.as_str();
                image_url(captured.trim_matches(|c| c == '\'' || c == '"'))
            }
            Transform::ImageSource => image_url(raw),
            Transform::Genre { separator } => {
                if !raw.contains(CERTIFICATION_MARKER) {
                    return None;
                }
                let tail = raw.rsplit(CERTIFICATION_MARKER).next().unwrap_or_default();
                let tokens: Vec<&str> = separator.split(tail).filter(|t| !t.is_empty()).collect();
                (!tokens.is_empty()).then(|| tokens.join(" • "))
            }
            Transform::Resolve(origin) => {
                let href = raw.trim();
                if href.is_empty() {
                    return None;
                }
                origin.join(href).ok().map(String::from)
            }
        }
    }
}

/// Accepts a non-empty URL that is not an inline `data:` image
fn image_url(candidate: &str) -> Option<String> {
    let url = candidate.trim();
    if url.is_empty() || url.starts_with("data:") {
        None
    } else {
        Some(url.to_string())
    }
}

/// Text content with every text node trimmed and concatenated
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

struct Rule {
    source: Source,
    transform: Transform,
}

impl Rule {
    fn new(source: Source, transform: Transform) -> Self {
        Self { source, transform }
    }

    fn apply(&self, entry: ElementRef<'_>) -> Option<String> {
        let raw = self.source.read(entry)?;
        self.transform.apply(&raw).filter(|v| !v.is_empty())
    }
}

struct FieldRules {
    field: Field,
    rules: Vec<Rule>,
}

/// Extracts a [`MovieRecord`] from one listing entry element
pub struct FieldExtractor {
    table: Vec<FieldRules>,
}

impl FieldExtractor {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let s = &config.selectors;
        let origin = Url::parse(&config.site_origin)?;

        let text = |selector: &str| -> Result<Vec<Rule>> {
            Ok(vec![Rule::new(
                Source::Text(selector_for(selector)?),
                Transform::Verbatim,
            )])
        };

        let mut poster = Vec::new();
        for pattern in POSTER_PATTERNS {
            poster.push(Rule::new(
                Source::Attribute {
                    selector: selector_for(&s.poster)?,
                    name: "style".to_string(),
                },
                Transform::StyleUrl(Regex::new(pattern)?),
            ));
        }
        for attribute in &config.lazy_attributes {
            poster.push(Rule::new(
                Source::Attribute {
                    selector: selector_for(&s.poster)?,
                    name: attribute.clone(),
                },
                Transform::ImageSource,
            ));
        }

        let table = vec![
            FieldRules {
                field: Field::TitleNative,
                rules: text(&s.title_native)?,
            },
            FieldRules {
                field: Field::TitleOriginal,
                rules: text(&s.title_original)?,
            },
            FieldRules {
                field: Field::Rating,
                rules: text(&s.rating)?,
            },
            FieldRules {
                field: Field::Certification,
                rules: vec![Rule::new(
                    Source::Nested {
                        container: selector_for(&s.certificate)?,
                        target: selector_for(&s.certificate_badge)?,
                    },
                    Transform::Verbatim,
                )],
            },
            FieldRules {
                field: Field::Duration,
                rules: vec![Rule::new(
                    Source::Text(selector_for(&s.status)?),
                    Transform::Capture {
                        pattern: Regex::new(DURATION_PATTERN)?,
                        prefix: "",
                    },
                )],
            },
            FieldRules {
                field: Field::ReleaseWindow,
                rules: vec![Rule::new(
                    Source::Text(selector_for(&s.status)?),
                    Transform::Capture {
                        pattern: Regex::new(RELEASE_PATTERN)?,
                        prefix: "上映",
                    },
                )],
            },
            FieldRules {
                field: Field::Genre,
                rules: vec![Rule::new(
                    Source::Text(selector_for(&s.category)?),
                    Transform::Genre {
                        separator: Regex::new(GENRE_SEPARATOR)?,
                    },
                )],
            },
            FieldRules {
                field: Field::Poster,
                rules: poster,
            },
            FieldRules {
                field: Field::Trailer,
                rules: vec![Rule::new(
                    Source::Attribute {
                        selector: selector_for(&s.trailer)?,
                        name: "href".to_string(),
                    },
                    Transform::Resolve(origin),
                )],
            },
        ];

        Ok(Self { table })
    }

    /// Run the rules of a single field, first non-empty value wins
    pub fn extract_field(&self, field: Field, entry: ElementRef<'_>) -> Option<String> {
        self.table
            .iter()
            .find(|f| f.field == field)?
            .rules
            .iter()
            .find_map(|rule| rule.apply(entry))
    }

    pub fn extract(&self, entry: ElementRef<'_>) -> MovieRecord {
        let mut record = MovieRecord::default();

        for FieldRules { field, rules } in &self.table {
            let value = rules.iter().find_map(|rule| rule.apply(entry));
            let slot = match field {
                Field::TitleNative => &mut record.title_native,
                Field::TitleOriginal => &mut record.title_original,
                Field::Rating => &mut record.rating,
                Field::Certification => &mut record.certification,
                Field::Duration => &mut record.duration,
                Field::ReleaseWindow => &mut record.release_window,
                Field::Genre => &mut record.genre,
                Field::Poster => &mut record.poster_url,
                Field::Trailer => &mut record.trailer_url,
            };
            *slot = value;
        }

        record
    }
}

pub(crate) fn selector_for(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| MarqueeError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn extractor() -> FieldExtractor {
        FieldExtractor::new(&ScraperConfig::default()).unwrap()
    }

    fn extract(fragment: &str) -> MovieRecord {
        let html = Html::parse_fragment(&format!(
            r#"<ul><li class="detailList-item">{fragment}</li></ul>"#
        ));
        let selector = Selector::parse("li.detailList-item").unwrap();
        let entry = html.select(&selector).next().unwrap();
        extractor().extract(entry)
    }

    fn poster_rule(index: usize) -> Transform {
        Transform::StyleUrl(Regex::new(POSTER_PATTERNS[index]).unwrap())
    }

    #[test]
    fn test_full_entry() {
        let record = extract(
            r#"
            <figure class="detailListItem-posterImage"
                    style="background-image: url(&quot;https://img.example.com/dune.jpg&quot;);"></figure>
            <h2 class="detailListItem-title"> 沙丘：第二部 </h2>
            <h3 class="detailListItem-engTitle">Dune: Part Two</h3>
            <span class="iconInfo-text">8.6</span>
            <div class="detailListItem-certificate"><span class="glnBadge-text">輔12級</span></div>
            <div class="detailListItem-status"><span>2小時46分</span> <span>上映3週</span></div>
            <div class="detailListItem-category"><span>輔12級</span><span>科幻 • 冒險</span></div>
            <a class="detailListItem-trailer" href="/tw/v2/article/abc">預告片</a>
            "#,
        );

        assert_eq!(record.title_native.as_deref(), Some("沙丘：第二部"));
        assert_eq!(record.title_original.as_deref(), Some("Dune: Part Two"));
        assert_eq!(record.rating.as_deref(), Some("8.6"));
        assert_eq!(record.certification.as_deref(), Some("輔12級"));
        assert_eq!(record.duration.as_deref(), Some("2小時46分"));
        assert_eq!(record.release_window.as_deref(), Some("上映3週"));
        assert_eq!(record.genre.as_deref(), Some("科幻 • 冒險"));
        assert_eq!(
            record.poster_url.as_deref(),
            Some("https://img.example.com/dune.jpg")
        );
        assert_eq!(
            record.trailer_url.as_deref(),
            Some("https://today.line.me/tw/v2/article/abc")
        );
    }

    #[test]
    fn test_missing_title_leaves_field_unset() {
        let record = extract(r#"<span class="iconInfo-text">7.1</span>"#);
        assert_eq!(record.title_native, None);
        assert_eq!(record.rating.as_deref(), Some("7.1"));
        assert!(!record.has_title());
    }

    #[test]
    fn test_each_poster_pattern_in_isolation() {
        let cases = [
            (0, "background-image: url('https://a.example/1.jpg')"),
            (1, "background: url(\"https://a.example/1.jpg\") no-repeat"),
            (2, "mask: url(https://a.example/1.jpg)"),
        ];
        for (index, style) in cases {
            assert_eq!(
                poster_rule(index).apply(style).as_deref(),
                Some("https://a.example/1.jpg"),
                "pattern {index}"
            );
        }
    }

    #[test]
    fn test_each_poster_pattern_rejects_data_uri() {
        let cases = [
            (0, "background-image: url(data:image/gif;base64,R0lGOD)"),
            (1, "background: url('data:image/png;base64,iVBOR')"),
            (2, "url(\"data:image/svg+xml;utf8,<svg/>\")"),
        ];
        for (index, style) in cases {
            assert_eq!(poster_rule(index).apply(style), None, "pattern {index}");
        }
    }

    #[test]
    fn test_poster_pattern_is_case_insensitive() {
        assert_eq!(
            poster_rule(0).apply("BACKGROUND-IMAGE: URL(https://a.example/x.png)").as_deref(),
            Some("https://a.example/x.png")
        );
    }

    #[test]
    fn test_poster_data_uri_in_entry_yields_no_poster() {
        let record = extract(
            r#"<h2 class="detailListItem-title">A</h2>
            <figure class="detailListItem-posterImage" style="background-image:url(data:image/gif;base64,AAAA)"></figure>"#,
        );
        assert_eq!(record.poster_url, None);
    }

    #[test]
    fn test_poster_without_style_attribute() {
        let record = extract(
            r#"<h2 class="detailListItem-title">A</h2><figure class="detailListItem-posterImage"></figure>"#,
        );
        assert_eq!(record.poster_url, None);
    }

    #[test]
    fn test_poster_falls_back_to_lazy_attribute() {
        let record = extract(
            r#"<h2 class="detailListItem-title">A</h2>
            <figure class="detailListItem-posterImage" style="height: 200px" data-background="https://a.example/lazy.jpg"></figure>"#,
        );
        assert_eq!(record.poster_url.as_deref(), Some("https://a.example/lazy.jpg"));
    }

    #[test]
    fn test_duration_and_release_window() {
        let record = extract(
            r#"<div class="detailListItem-status">片長 2小時15分 ｜ 上映5天</div>"#,
        );
        assert_eq!(record.duration.as_deref(), Some("2小時15分"));
        assert_eq!(record.release_window.as_deref(), Some("上映5天"));
    }

    #[test]
    fn test_status_without_matches() {
        let record = extract(r#"<div class="detailListItem-status">即將上映</div>"#);
        assert_eq!(record.duration, None);
        assert_eq!(record.release_window, None);
    }

    #[test]
    fn test_genre_requires_certification_marker() {
        let record = extract(r#"<div class="detailListItem-category">劇情 • 動作</div>"#);
        assert_eq!(record.genre, None);

        let record = extract(r#"<div class="detailListItem-category">普遍級 • </div>"#);
        assert_eq!(record.genre, None);

        let record = extract(
            r#"<div class="detailListItem-category">保護級 • 動畫 • 家庭</div>"#,
        );
        assert_eq!(record.genre.as_deref(), Some("動畫 • 家庭"));
    }

    #[test]
    fn test_certification_needs_badge() {
        let record = extract(r#"<div class="detailListItem-certificate">限制級</div>"#);
        assert_eq!(record.certification, None);
    }

    #[test]
    fn test_trailer_without_href() {
        let record = extract(r#"<a class="detailListItem-trailer">預告片</a>"#);
        assert_eq!(record.trailer_url, None);
    }

    #[test]
    fn test_trailer_with_empty_href() {
        let record = extract(r#"<a class="detailListItem-trailer" href="">預告片</a>"#);
        assert_eq!(record.trailer_url, None);

        let record = extract(r#"<a class="detailListItem-trailer" href="  ">預告片</a>"#);
        assert_eq!(record.trailer_url, None);
    }

    #[test]
    fn test_trailer_absolute_href_kept() {
        let record = extract(
            r#"<a class="detailListItem-trailer" href="https://video.example.com/t/1">預告片</a>"#,
        );
        assert_eq!(
            record.trailer_url.as_deref(),
            Some("https://video.example.com/t/1")
        );
    }

    #[test]
    fn test_extract_field_single_rule() {
        let html = Html::parse_fragment(
            r#"<li class="detailList-item"><span class="iconInfo-text">9.0</span></li>"#,
        );
        let selector = Selector::parse("li").unwrap();
        let entry = html.select(&selector).next().unwrap();
        let extractor = extractor();

        assert_eq!(
            extractor.extract_field(Field::Rating, entry).as_deref(),
            Some("9.0")
        );
        assert_eq!(extractor.extract_field(Field::TitleNative, entry), None);
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let mut config = ScraperConfig::default();
        config.selectors.rating = "span[".to_string();
        let err = FieldExtractor::new(&config).err().unwrap();
        assert!(matches!(err, MarqueeError::Selector { .. }));
    }
}
