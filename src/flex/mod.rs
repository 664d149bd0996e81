//! LINE-style rich message model.
//!
//! Only the subset the bot sends is modelled: text and flex messages,
//! bubble and carousel containers, and box/text/image/button components.
//! Everything serializes to the messaging API JSON shape.

mod movie_card;
mod word_card;

pub use movie_card::{movie_bubble, movie_carousel, MOVIE_CHART_ALT_TEXT};
pub use word_card::{word_bubble, word_message};

use serde::Serialize;
use url::Url;

use crate::app::{MarqueeError, Result};

/// Messaging API limit on action and image URIs
pub const MAX_URI_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Message {
    Text {
        text: String,
    },
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: FlexContainer,
    },
}

impl Message {
    pub fn flex(alt_text: impl Into<String>, contents: FlexContainer) -> Self {
        Message::Flex {
            alt_text: alt_text.into(),
            contents,
        }
    }

    pub fn alt_text(&self) -> Option<&str> {
        match self {
            Message::Flex { alt_text, .. } => Some(alt_text.as_str()),
            Message::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FlexContainer {
    Bubble(Bubble),
    Carousel { contents: Vec<Bubble> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Bubble {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Component>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Component {
    Box(BoxComponent),
    Text(TextComponent),
    Image(ImageComponent),
    Button(ButtonComponent),
}

impl From<BoxComponent> for Component {
    fn from(c: BoxComponent) -> Self {
        Component::Box(c)
    }
}

impl From<TextComponent> for Component {
    fn from(c: TextComponent) -> Self {
        Component::Text(c)
    }
}

impl From<ImageComponent> for Component {
    fn from(c: ImageComponent) -> Self {
        Component::Image(c)
    }
}

impl From<ButtonComponent> for Component {
    fn from(c: ButtonComponent) -> Self {
        Component::Button(c)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxComponent {
    pub layout: String,
    pub contents: Vec<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_all: Option<String>,
}

impl BoxComponent {
    pub fn vertical(contents: Vec<Component>) -> Self {
        Self::with_layout("vertical", contents)
    }

    pub fn horizontal(contents: Vec<Component>) -> Self {
        Self::with_layout("horizontal", contents)
    }

    fn with_layout(layout: &str, contents: Vec<Component>) -> Self {
        Self {
            layout: layout.to_string(),
            contents,
            spacing: None,
            margin: None,
            padding_all: None,
        }
    }

    pub fn spacing(mut self, spacing: &str) -> Self {
        self.spacing = Some(spacing.to_string());
        self
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    pub fn padding_all(mut self, padding: &str) -> Self {
        self.padding_all = Some(padding.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flex: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub wrap: bool,
}

impl TextComponent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
            weight: None,
            color: None,
            margin: None,
            flex: None,
            wrap: false,
        }
    }

    pub fn size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some("bold".to_string());
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn margin(mut self, margin: &str) -> Self {
        self.margin = Some(margin.to_string());
        self
    }

    pub fn flex(mut self, flex: u32) -> Self {
        self.flex = Some(flex);
        self
    }

    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageComponent {
    pub url: String,
    pub size: String,
    pub aspect_ratio: String,
    pub aspect_mode: String,
}

impl ImageComponent {
    /// Full-width cover image; fails on a URL the messaging API would reject
    pub fn cover(url: &str, aspect_ratio: &str) -> Result<Self> {
        Ok(Self {
            url: checked_uri(url)?,
            size: "full".to_string(),
            aspect_ratio: aspect_ratio.to_string(),
            aspect_mode: "cover".to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonComponent {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ButtonComponent {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            style: None,
            color: None,
        }
    }

    pub fn style(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    Uri { label: String, uri: String },
}

impl Action {
    pub fn uri(label: impl Into<String>, uri: &str) -> Result<Self> {
        Ok(Action::Uri {
            label: label.into(),
            uri: checked_uri(uri)?,
        })
    }
}

/// Validate an absolute http(s) URI within the length limit
pub fn checked_uri(uri: &str) -> Result<String> {
    if uri.len() > MAX_URI_LENGTH {
        return Err(MarqueeError::Render(format!(
            "URI longer than {} characters",
            MAX_URI_LENGTH
        )));
    }

    let parsed = Url::parse(uri)?;
    match parsed.scheme() {
        "http" | "https" => Ok(uri.to_string()),
        other => Err(MarqueeError::Render(format!(
            "Unsupported URI scheme `{}`",
            other
        ))),
    }
}
