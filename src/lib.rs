//! # Marquee
//!
//! Content enrichment for a chat bot: a trending-movie carousel scraped
//! from a JavaScript-rendered chart page, and AI-generated English
//! vocabulary cards.
//!
//! ## Architecture
//!
//! ```text
//! Movies:     ChromeLoader → rendered HTML → ListingParser → MovieRecord → movie cards → carousel
//! Vocabulary: TextGenerator → ModelReply → recover_object → VocabularyRecord → word card
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the trending chart as a flex carousel
//! marquee movies
//!
//! # Parse a saved chart page offline
//! marquee parse chart.html
//!
//! # Generate a vocabulary card (needs GROQ_API_KEY)
//! marquee word --user U123
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the chart
/// service, the offline parser and the vocabulary generator.
pub mod app;

/// Command-line interface using clap.
///
/// - `movies` - Scrape and print the trending carousel
/// - `parse <path>` - Parse a saved chart page
/// - `word [--user <id>]` - Generate a vocabulary card
/// - `audio <text>` - Print a text-to-speech link
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/marquee/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`MovieRecord`](domain::MovieRecord): One trending chart entry
/// - [`VocabularyRecord`](domain::VocabularyRecord): One vocabulary lesson
pub mod domain;

/// Rich message model and card renderers.
pub mod flex;

/// Trending chart service: scrape, parse, truncate and render.
pub mod movies;

/// Headless Chrome rendering and HTML extraction of the trending chart.
///
/// - [`ChromeLoader`](scraper::ChromeLoader): Renders the chart page
/// - [`ListingParser`](scraper::ListingParser): Page to records
/// - [`FieldExtractor`](scraper::FieldExtractor): Rule tables per field
pub mod scraper;

/// Vocabulary lessons from a chat-completion model.
///
/// - [`TextGenerator`](vocabulary::TextGenerator): Async trait for model backends
/// - [`GroqClient`](vocabulary::GroqClient): reqwest-based implementation
/// - [`VocabularyLesson`](vocabulary::VocabularyLesson): Reply recovery and fallback
pub mod vocabulary;
