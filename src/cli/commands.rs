use std::path::Path;

use serde::Serialize;

use crate::app::{AppContext, Result};
use crate::vocabulary::audio_url;

pub async fn show_movies(ctx: &AppContext) -> Result<()> {
    match ctx.movies.message().await? {
        Some(message) => print_json(&message)?,
        None => println!("No movies available"),
    }
    Ok(())
}

pub fn parse_file(ctx: &AppContext, path: &Path) -> Result<()> {
    let html = std::fs::read_to_string(path)?;
    let movies = ctx.parser.parse(&html);

    if movies.is_empty() {
        eprintln!("No movie entries found in {}", path.display());
    }
    print_json(&movies)
}

pub async fn show_word(ctx: &AppContext, user: &str) -> Result<()> {
    let message = ctx.vocabulary()?.message(user).await;
    print_json(&message)
}

pub fn show_audio(text: &str) -> Result<()> {
    let url = audio_url(text);
    if url.is_empty() {
        println!("Nothing to pronounce");
    } else {
        println!("{}", url);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
