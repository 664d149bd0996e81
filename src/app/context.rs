use std::sync::Arc;

use crate::app::error::{MarqueeError, Result};
use crate::config::Config;
use crate::movies::TrendingMovies;
use crate::scraper::{ChromeLoader, ListingParser, PageLoader};
use crate::vocabulary::{GroqClient, TextGenerator, VocabularyLesson};

pub struct AppContext {
    pub config: Config,
    pub movies: TrendingMovies,
    pub parser: ListingParser,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let loader: Arc<dyn PageLoader> = Arc::new(ChromeLoader::new(config.scraper.clone()));
        let generator: Option<Arc<dyn TextGenerator>> = match config.vocabulary.api_key() {
            Some(key) => {
                let client = GroqClient::new(config.vocabulary.clone(), key)?;
                Some(Arc::new(client) as Arc<dyn TextGenerator>)
            }
            None => None,
        };

        Self::with_components(config, loader, generator)
    }

    pub fn with_components(
        config: Config,
        loader: Arc<dyn PageLoader>,
        generator: Option<Arc<dyn TextGenerator>>,
    ) -> Result<Self> {
        let movies = TrendingMovies::new(loader, &config.scraper)?;
        let parser = ListingParser::new(&config.scraper)?;

        Ok(Self {
            config,
            movies,
            parser,
            generator,
        })
    }

    /// Vocabulary lessons; requires the API key environment variable
    pub fn vocabulary(&self) -> Result<VocabularyLesson> {
        let generator = self.generator.clone().ok_or_else(|| {
            MarqueeError::Config(format!(
                "{} is not set; vocabulary lessons are unavailable",
                self.config.vocabulary.api_key_env
            ))
        })?;
        Ok(VocabularyLesson::new(generator))
    }
}
