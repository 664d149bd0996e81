//! Scraping of the JavaScript-rendered trending chart.
//!
//! The chart page fills in its entries and poster images on the client, so
//! it is rendered in headless Chrome before parsing.
//!
//! # Architecture
//!
//! ```text
//! PageRequest → PageLoader (Chrome) → rendered HTML → ListingParser → Vec<MovieRecord>
//!                                                         └─ FieldExtractor per entry
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use marquee::scraper::{ChromeLoader, ListingParser, LoadOutcome, PageLoader, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let loader = ChromeLoader::new(config.clone());
//! let parser = ListingParser::new(&config)?;
//!
//! if let LoadOutcome::Rendered(html) = loader.load_rendered_html(&config.listing_request()).await? {
//!     let movies = parser.parse(&html);
//! }
//! ```

mod chrome;
mod config;
mod fields;
mod parser;
mod scripts;

pub use chrome::ChromeLoader;
pub use config::{default_headers, ListingSelectors, ScraperConfig, MAX_MOVIES};
pub use fields::{Field, FieldExtractor};
pub use parser::ListingParser;
pub use scripts::PageScripts;

#[cfg(test)]
pub(crate) use parser::tests::{entry_html, listing_html};

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::app::Result;

/// Browser window size used for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A page to render: target URL plus navigation headers and viewport
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub viewport: Viewport,
}

/// Result of rendering a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Fully rendered document HTML
    Rendered(String),
    /// The listing never appeared within the ready timeout.
    ///
    /// Not an error: the caller treats it as an empty chart.
    ContentNotReady,
}

/// Trait for page rendering implementations
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Render `request.url` and return its HTML once the listing is ready
    ///
    /// Navigation failures are returned as errors; a listing that never
    /// shows up is [`LoadOutcome::ContentNotReady`].
    async fn load_rendered_html(&self, request: &PageRequest) -> Result<LoadOutcome>;
}
