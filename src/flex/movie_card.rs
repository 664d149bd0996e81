use tracing::error;

use crate::app::Result;
use crate::domain::MovieRecord;
use crate::flex::{
    Action, BoxComponent, Bubble, ButtonComponent, Component, FlexContainer, ImageComponent,
    Message, TextComponent,
};

pub const MOVIE_CHART_ALT_TEXT: &str = "電影排行榜";

/// Build the card for one movie; rows for absent fields are omitted
pub fn movie_bubble(movie: &MovieRecord) -> Result<Bubble> {
    let hero: Option<Component> = match movie.poster_url.as_deref().filter(|p| !p.is_empty()) {
        Some(poster) => Some(ImageComponent::cover(poster, "2:3")?.into()),
        None => None,
    };

    let mut contents: Vec<Component> = vec![TextComponent::new(movie.display_title())
        .bold()
        .size("lg")
        .wrap()
        .into()];

    if let Some(original) = present(&movie.title_original) {
        contents.push(
            TextComponent::new(original)
                .size("sm")
                .color("#666666")
                .wrap()
                .margin("xs")
                .into(),
        );
    }

    let mut rating_row: Vec<Component> = Vec::new();
    if let Some(rating) = present(&movie.rating) {
        rating_row.push(
            TextComponent::new(format!("⭐ {}", rating))
                .size("sm")
                .color("#FFD700")
                .flex(1)
                .into(),
        );
    }
    if let Some(certification) = present(&movie.certification) {
        rating_row.push(
            TextComponent::new(format!("🔞 {}", certification))
                .size("sm")
                .color("#FF4757")
                .flex(1)
                .into(),
        );
    }
    if !rating_row.is_empty() {
        contents.push(BoxComponent::horizontal(rating_row).margin("sm").into());
    }

    let info_rows = [
        (&movie.duration, "⏱️"),
        (&movie.genre, "🎬"),
        (&movie.release_window, "📅"),
    ];
    for (info, icon) in info_rows {
        if let Some(info) = present(info) {
            contents.push(
                TextComponent::new(format!("{} {}", icon, info))
                    .size("sm")
                    .color("#666666")
                    .wrap()
                    .margin("xs")
                    .into(),
            );
        }
    }

    let footer: Option<Component> = match present(&movie.trailer_url) {
        Some(trailer) => Some(
            BoxComponent::vertical(vec![ButtonComponent::new(Action::uri("觀看預告片", trailer)?)
                .style("primary")
                .color("#FF6B6B")
                .into()])
            .padding_all("20px")
            .into(),
        ),
        None => None,
    };

    Ok(Bubble {
        header: None,
        hero,
        body: Some(
            BoxComponent::vertical(contents)
                .spacing("sm")
                .padding_all("20px")
                .into(),
        ),
        footer,
    })
}

/// Wrap up to `max_movies` cards into a carousel message.
///
/// A card that fails to build is logged and skipped. Returns `None` when no
/// card could be built.
pub fn movie_carousel(movies: &[MovieRecord], max_movies: usize) -> Option<Message> {
    let bubbles: Vec<Bubble> = movies
        .iter()
        .take(max_movies)
        .filter_map(|movie| match movie_bubble(movie) {
            Ok(bubble) => Some(bubble),
            Err(e) => {
                error!("Failed to build card for {}: {}", movie.display_title(), e);
                None
            }
        })
        .collect();

    if bubbles.is_empty() {
        return None;
    }

    Some(Message::flex(
        MOVIE_CHART_ALT_TEXT,
        FlexContainer::Carousel { contents: bubbles },
    ))
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}
