pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Trending movie cards and vocabulary lessons for a chat bot", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/marquee/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scrape the trending chart and print the carousel message
    Movies,
    /// Parse a saved chart page and print the movie records
    Parse {
        /// Path to the HTML file
        path: std::path::PathBuf,
    },
    /// Generate a vocabulary lesson and print the card message
    Word {
        /// Conversation identifier used for chat context
        #[arg(short, long, default_value = "cli")]
        user: String,
    },
    /// Print the text-to-speech link for some text
    Audio {
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_word_command() {
        let cli = Cli::try_parse_from(["marquee", "word", "--user", "U123"]).unwrap();
        assert!(matches!(cli.command, Commands::Word { ref user } if user == "U123"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["marquee", "movies", "--config", "/tmp/m.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::Movies));
        assert_eq!(cli.config.as_deref(), Some(std::path::Path::new("/tmp/m.toml")));
    }
}
