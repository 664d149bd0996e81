use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use marquee::app::AppContext;
use marquee::cli::{commands, Cli, Commands};
use marquee::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Movies => {
            if let Err(e) = commands::show_movies(&ctx).await {
                eprintln!("Failed to scrape the movie chart: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Parse { path } => {
            commands::parse_file(&ctx, &path)?;
        }
        Commands::Word { user } => {
            commands::show_word(&ctx, &user).await?;
        }
        Commands::Audio { text } => {
            commands::show_audio(&text)?;
        }
    }

    Ok(())
}
