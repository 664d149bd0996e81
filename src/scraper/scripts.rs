use crate::scraper::ScraperConfig;

/// JavaScript snippets evaluated in the listing page
pub struct PageScripts {
    config: ScraperConfig,
}

impl PageScripts {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Returns `true` once the first listing entry is attached to the DOM
    pub fn entry_present_script(&self) -> String {
        format!(
            "document.querySelector({}) !== null",
            js_string(&self.config.selectors.entry)
        )
    }

    /// Scroll to a fraction of the document height
    pub fn scroll_script(offset: f64) -> String {
        format!("window.scrollTo(0, document.body.scrollHeight * {offset})")
    }

    /// Generate JavaScript that forces poster images to load
    ///
    /// For every poster element this:
    /// 1. Toggles `display` off and on, reading `offsetHeight` in between to force a reflow
    /// 2. Copies the first lazy-loading attribute into `background-image` if none is set yet
    pub fn promote_posters_script(&self) -> String {
        let attributes = self
            .config
            .lazy_attributes
            .iter()
            .map(|a| js_string(a))
            .collect::<Vec<_>>()
            .join(", ");
        let poster = js_string(&self.config.selectors.poster);

        format!(
            r#"
            (() => {{
                const figures = document.querySelectorAll({poster});
                const lazyAttributes = [{attributes}];
                figures.forEach(figure => {{
                    const originalDisplay = figure.style.display;
                    figure.style.display = 'none';
                    void figure.offsetHeight;
                    figure.style.display = originalDisplay || '';

                    for (const attr of lazyAttributes) {{
                        const source = figure.getAttribute(attr);
                        if (source && !figure.style.backgroundImage) {{
                            figure.style.backgroundImage = `url(${{source}})`;
                        }}
                    }}
                }});
                return figures.length;
            }})()
            "#
        )
    }

    /// Count poster elements that now carry a background image
    pub fn poster_count_script(&self) -> String {
        let selector = format!(
            "{}[style*=\"background-image\"]",
            self.config.selectors.poster
        );
        format!("document.querySelectorAll({}).length", js_string(&selector))
    }
}

/// Quote a value as a JavaScript string literal
fn js_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}
