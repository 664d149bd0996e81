use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::scraper::{PageRequest, Viewport};

pub const MAX_MOVIES: usize = 10;

/// Configuration for the trending-chart scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Trending chart listing page
    pub listing_url: String,

    /// Origin prefixed to relative trailer links
    pub site_origin: String,

    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Navigation timeout in seconds (default: 20)
    pub navigation_timeout_secs: u64,

    /// How long to wait for the first listing entry in seconds (default: 15)
    pub ready_timeout_secs: u64,

    /// Poll interval while waiting for the listing in milliseconds (default: 250)
    pub ready_poll_ms: u64,

    /// Scroll positions as fractions of the page height, visited in order
    pub scroll_offsets: Vec<f64>,

    /// Pause after each scroll step in milliseconds (default: 1000)
    pub scroll_pause_ms: u64,

    /// Final settle time after forcing poster loads in milliseconds (default: 3000)
    pub settle_ms: u64,

    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Extra headers sent with the page navigation
    pub headers: BTreeMap<String, String>,

    /// Lazy-loading attributes promoted to an inline background image
    pub lazy_attributes: Vec<String>,

    /// Maximum number of cards rendered into the carousel (default: 10)
    pub max_movies: usize,

    pub selectors: ListingSelectors,
}

/// CSS selectors describing the listing markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    pub entry: String,
    pub title_native: String,
    pub title_original: String,
    pub rating: String,
    pub certificate: String,
    pub certificate_badge: String,
    pub poster: String,
    pub status: String,
    pub category: String,
    pub trailer: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            entry: "li.detailList-item".to_string(),
            title_native: "h2.detailListItem-title".to_string(),
            title_original: "h3.detailListItem-engTitle".to_string(),
            rating: "span.iconInfo-text".to_string(),
            certificate: "div.detailListItem-certificate".to_string(),
            certificate_badge: "span.glnBadge-text".to_string(),
            poster: "figure.detailListItem-posterImage".to_string(),
            status: "div.detailListItem-status".to_string(),
            category: "div.detailListItem-category".to_string(),
            trailer: "a.detailListItem-trailer".to_string(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            listing_url: "https://today.line.me/tw/v2/movie/chart/trending".to_string(),
            site_origin: "https://today.line.me".to_string(),
            headless: true,
            navigation_timeout_secs: 20,
            ready_timeout_secs: 15,
            ready_poll_ms: 250,
            scroll_offsets: vec![0.0, 0.3, 0.6, 1.0, 0.0],
            scroll_pause_ms: 1000,
            settle_ms: 3000,
            viewport_width: 1920,
            viewport_height: 1080,
            headers: default_headers(),
            lazy_attributes: vec![
                "data-bg".to_string(),
                "data-background".to_string(),
                "data-src".to_string(),
            ],
            max_movies: MAX_MOVIES,
            selectors: ListingSelectors::default(),
        }
    }
}

/// Desktop browser header set
pub fn default_headers() -> BTreeMap<String, String> {
    [
        (
            "User-Agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        ),
        (
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
        ("Accept-Language", "zh-TW,zh;q=0.8,en-US;q=0.5,en;q=0.3"),
        ("Accept-Encoding", "gzip, deflate, br"),
        ("Connection", "keep-alive"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl ScraperConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }

    pub fn ready_poll(&self) -> Duration {
        Duration::from_millis(self.ready_poll_ms)
    }

    pub fn scroll_pause(&self) -> Duration {
        Duration::from_millis(self.scroll_pause_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// The navigation request for the trending listing
    pub fn listing_request(&self) -> PageRequest {
        PageRequest {
            url: self.listing_url.clone(),
            headers: self.headers.clone(),
            viewport: self.viewport(),
        }
    }
}
