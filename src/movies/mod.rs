use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::app::Result;
use crate::domain::MovieRecord;
use crate::flex::{movie_carousel, Message};
use crate::scraper::{ListingParser, LoadOutcome, PageLoader, PageRequest, ScraperConfig};

/// Outcome of one chart scrape
#[derive(Debug, Clone)]
pub enum ScrapeOutcome {
    /// Parsed entries in page order; may be empty
    Listed(MovieChart),
    /// The listing never rendered; treated as "no movies today"
    ContentNotReady,
}

#[derive(Debug, Clone)]
pub struct MovieChart {
    pub movies: Vec<MovieRecord>,
    pub scraped_at: DateTime<Utc>,
}

impl ScrapeOutcome {
    pub fn movies(&self) -> &[MovieRecord] {
        match self {
            ScrapeOutcome::Listed(chart) => &chart.movies,
            ScrapeOutcome::ContentNotReady => &[],
        }
    }
}

/// Trending chart service: render, parse and turn into a carousel
pub struct TrendingMovies {
    loader: Arc<dyn PageLoader>,
    parser: ListingParser,
    request: PageRequest,
    max_movies: usize,
}

impl TrendingMovies {
    pub fn new(loader: Arc<dyn PageLoader>, config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            loader,
            parser: ListingParser::new(config)?,
            request: config.listing_request(),
            max_movies: config.max_movies,
        })
    }

    /// Scrape the chart. Navigation failures are errors; a listing that
    /// never renders is [`ScrapeOutcome::ContentNotReady`].
    pub async fn scrape(&self) -> Result<ScrapeOutcome> {
        match self.loader.load_rendered_html(&self.request).await? {
            LoadOutcome::Rendered(html) => Ok(ScrapeOutcome::Listed(MovieChart {
                movies: self.parser.parse(&html),
                scraped_at: Utc::now(),
            })),
            LoadOutcome::ContentNotReady => Ok(ScrapeOutcome::ContentNotReady),
        }
    }

    /// Chart as a carousel of at most `max_movies` cards, `None` when empty
    pub async fn message(&self) -> Result<Option<Message>> {
        let outcome = self.scrape().await?;
        let movies = outcome.movies();

        if movies.is_empty() {
            warn!("No movie data available");
            return Ok(None);
        }

        let message = movie_carousel(movies, self.max_movies);
        if let (Some(_), ScrapeOutcome::Listed(chart)) = (&message, &outcome) {
            info!(
                "Rendered {} of {} movies scraped at {}",
                movies.len().min(self.max_movies),
                movies.len(),
                chart.scraped_at.to_rfc3339()
            );
        }
        Ok(message)
    }
}
