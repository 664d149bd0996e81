//! Configuration management for Marquee.
//!
//! Configuration is read from `~/.config/marquee/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

use crate::scraper::ScraperConfig;
use crate::vocabulary::VocabularyConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub vocabulary: VocabularyConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating it when missing.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/marquee/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("marquee").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Marquee Configuration

[scraper]
# Trending chart page and the origin used for relative trailer links
listing_url = "https://today.line.me/tw/v2/movie/chart/trending"
site_origin = "https://today.line.me"

# Run browser in headless mode (no visible window)
headless = true

# Navigation timeout in seconds; a failure here is reported as an error
navigation_timeout_secs = 20

# How long to wait for the listing to render (seconds); on timeout the
# chart is treated as empty
ready_timeout_secs = 15
ready_poll_ms = 250

# Scroll positions (fraction of page height) visited to trigger lazy loading
scroll_offsets = [0.0, 0.3, 0.6, 1.0, 0.0]
scroll_pause_ms = 1000

# Wait after forcing poster images to load (milliseconds)
settle_ms = 3000

viewport_width = 1920
viewport_height = 1080

# Lazy-loading attributes promoted to an inline background image
lazy_attributes = ["data-bg", "data-background", "data-src"]

# Maximum number of cards in the carousel
max_movies = 10

[scraper.headers]
"User-Agent" = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
"Accept" = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
"Accept-Language" = "zh-TW,zh;q=0.8,en-US;q=0.5,en;q=0.3"
"Accept-Encoding" = "gzip, deflate, br"
"Connection" = "keep-alive"

[scraper.selectors]
entry = "li.detailList-item"
title_native = "h2.detailListItem-title"
title_original = "h3.detailListItem-engTitle"
rating = "span.iconInfo-text"
certificate = "div.detailListItem-certificate"
certificate_badge = "span.glnBadge-text"
poster = "figure.detailListItem-posterImage"
status = "div.detailListItem-status"
category = "div.detailListItem-category"
trailer = "a.detailListItem-trailer"

[vocabulary]
# OpenAI-compatible chat completion API
api_base = "https://api.groq.com/openai/v1"
model = "llama-3.3-70b-versatile"

# The API key is read from this environment variable
api_key_env = "GROQ_API_KEY"

timeout_secs = 30

# Messages remembered per user for conversational context
max_history = 10

# Request a JSON object response
json_mode = false
temperature = 0.7
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
