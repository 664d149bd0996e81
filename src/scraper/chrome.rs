use std::collections::BTreeMap;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::{Headers, SetExtraHttpHeadersParams};
use chromiumoxide::handler::viewport::Viewport as CdpViewport;
use chromiumoxide::Page;
use futures::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::app::{MarqueeError, Result};
use crate::scraper::config::ScraperConfig;
use crate::scraper::scripts::PageScripts;
use crate::scraper::{LoadOutcome, PageLoader, PageRequest, Viewport};

/// Page operations the loader drives, in the order it drives them
#[async_trait]
trait RenderPage: Send + Sync {
    async fn apply_headers(&self, headers: &BTreeMap<String, String>) -> Result<()>;

    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evaluate a script; `Value::Null` when it returns nothing
    async fn run_script(&self, script: String) -> Result<Value>;

    async fn html(&self) -> Result<String>;
}

/// A browser owning the pages of one load
#[async_trait]
trait RenderSession: Send + Sync + Sized {
    type Page: RenderPage;

    async fn open_page(&self) -> Result<Self::Page>;

    async fn close(self);
}

#[async_trait]
impl RenderPage for Page {
    async fn apply_headers(&self, headers: &BTreeMap<String, String>) -> Result<()> {
        if headers.is_empty() {
            return Ok(());
        }

        if let Some(ua) = headers.get("User-Agent") {
            self.set_user_agent(ua)
                .await
                .map_err(|e| MarqueeError::Browser(format!("Failed to set user agent: {}", e)))?;
        }

        let headers = serde_json::to_value(headers)?;
        self.execute(SetExtraHttpHeadersParams::new(Headers::new(headers)))
            .await
            .map_err(|e| MarqueeError::Browser(format!("Failed to set headers: {}", e)))?;

        Ok(())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url.to_string())
            .await
            .map_err(|e| MarqueeError::Browser(e.to_string()))?;
        Ok(())
    }

    async fn run_script(&self, script: String) -> Result<Value> {
        let result = self
            .evaluate(script)
            .await
            .map_err(|e| MarqueeError::Browser(e.to_string()))?;
        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn html(&self) -> Result<String> {
        self.content()
            .await
            .map_err(|e| MarqueeError::Browser(format!("Failed to read page content: {}", e)))
    }
}

/// A launched browser and its event loop
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(headless: bool, viewport: Viewport) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-software-rasterizer")
            .window_size(viewport.width, viewport.height)
            .viewport(CdpViewport {
                width: viewport.width,
                height: viewport.height,
                ..Default::default()
            });

        if !headless {
            builder = builder.with_head();
        }

        let browser_config = builder
            .build()
            .map_err(|e| MarqueeError::Browser(format!("Failed to build browser config: {}", e)))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| MarqueeError::Browser(format!(
                "Failed to launch browser: {}. Is Chrome or Chromium installed and in PATH?",
                e
            )))?;

        let handler = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        Ok(Self { browser, handler })
    }
}

#[async_trait]
impl RenderSession for BrowserSession {
    type Page = Page;

    async fn open_page(&self) -> Result<Page> {
        self.browser
            .new_page("about:blank")
            .await
            .map_err(|e| MarqueeError::Browser(format!("Failed to create page: {}", e)))
    }

    async fn close(self) {
        let mut session = self;
        if let Err(e) = session.browser.close().await {
            warn!("Failed to close browser, killing it: {}", e);
            if let Some(Err(e)) = session.browser.kill().await {
                warn!("Failed to kill browser process: {}", e);
            }
            return;
        }
        if let Err(e) = session.browser.wait().await {
            debug!("Browser process did not exit cleanly: {}", e);
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

/// Headless Chrome loader for the JavaScript-rendered chart page.
///
/// Each call launches its own browser; nothing is pooled between calls.
pub struct ChromeLoader {
    config: ScraperConfig,
    scripts: PageScripts,
}

impl ChromeLoader {
    pub fn new(config: ScraperConfig) -> Self {
        let scripts = PageScripts::new(config.clone());
        Self { config, scripts }
    }

    /// Render in a fresh page of `session`, closing the session on every path
    async fn load_in<S: RenderSession>(
        &self,
        session: S,
        request: &PageRequest,
    ) -> Result<LoadOutcome> {
        let outcome = match session.open_page().await {
            Ok(page) => self.render(&page, request).await,
            Err(e) => Err(e),
        };
        session.close().await;
        outcome
    }

    async fn render<P: RenderPage>(&self, page: &P, request: &PageRequest) -> Result<LoadOutcome> {
        page.apply_headers(&request.headers).await?;

        match tokio::time::timeout(self.config.navigation_timeout(), page.navigate(&request.url))
            .await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(MarqueeError::Navigation(format!("{}: {}", request.url, e)));
            }
            Err(_) => {
                return Err(MarqueeError::Navigation(format!(
                    "{}: timed out after {}s",
                    request.url, self.config.navigation_timeout_secs
                )));
            }
        }

        if !self.wait_for_listing(page).await {
            warn!(
                "Timed out after {}s waiting for the movie listing",
                self.config.ready_timeout_secs
            );
            return Ok(LoadOutcome::ContentNotReady);
        }

        self.scroll_and_load_images(page).await?;

        Ok(LoadOutcome::Rendered(page.html().await?))
    }

    /// Poll for the first listing entry; `false` once the ready timeout passes
    async fn wait_for_listing<P: RenderPage>(&self, page: &P) -> bool {
        let script = self.scripts.entry_present_script();

        let poll = async {
            loop {
                match page.run_script(script.clone()).await {
                    Ok(value) if value.as_bool().unwrap_or(false) => return,
                    Ok(_) => {}
                    Err(e) => debug!("Listing check failed: {}", e),
                }
                tokio::time::sleep(self.config.ready_poll()).await;
            }
        };

        tokio::time::timeout(self.config.ready_timeout(), poll)
            .await
            .is_ok()
    }

    /// Scroll through the page and force lazily loaded posters to render
    async fn scroll_and_load_images<P: RenderPage>(&self, page: &P) -> Result<()> {
        for &offset in &self.config.scroll_offsets {
            page.run_script(PageScripts::scroll_script(offset))
                .await
                .map_err(|e| MarqueeError::Browser(format!("Scroll failed: {}", e)))?;
            tokio::time::sleep(self.config.scroll_pause()).await;
        }

        page.run_script(self.scripts.promote_posters_script())
            .await
            .map_err(|e| MarqueeError::Browser(format!("Poster script failed: {}", e)))?;

        tokio::time::sleep(self.config.settle()).await;

        let loaded = page
            .run_script(self.scripts.poster_count_script())
            .await
            .map_err(|e| MarqueeError::Browser(format!("Poster count failed: {}", e)))?
            .as_u64()
            .unwrap_or(0);
        info!("Found {} poster elements with a background image", loaded);

        Ok(())
    }
}

#[async_trait]
impl PageLoader for ChromeLoader {
    async fn load_rendered_html(&self, request: &PageRequest) -> Result<LoadOutcome> {
        let session = BrowserSession::launch(self.config.headless, request.viewport).await?;
        self.load_in(session, request).await
    }
}
