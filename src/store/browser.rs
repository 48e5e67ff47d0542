//! Headless Chromium rendering for client-side rendered search pages.

use crate::config::Config;
use crate::store::renderer::SearchRenderer;
use crate::store::search::{build_search_url, restore_page_param};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Renders search pages in a fresh headless browser per call.
pub struct BrowserRenderer {
    store_url: String,
    navigation_timeout: Duration,
    render_wait: Duration,
    proxy: Option<String>,
}

impl BrowserRenderer {
    /// Creates a renderer from configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            store_url: config.store_url.clone(),
            navigation_timeout: Duration::from_millis(config.navigation_timeout_ms),
            render_wait: Duration::from_millis(config.render_wait_ms),
            proxy: config.proxy.clone(),
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(self.navigation_timeout)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--no-first-run")
            .arg("--window-size=1920,1080");

        if let Some(proxy) = &self.proxy {
            builder = builder.arg(format!("--proxy-server={}", proxy));
        }

        builder.build().map_err(|e| anyhow!("Browser config error: {e}"))
    }

    async fn goto(&self, page: &Page, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);

        tokio::time::timeout(self.navigation_timeout, page.goto(url))
            .await
            .with_context(|| format!("Navigation timed out: {}", url))?
            .with_context(|| format!("Failed to navigate: {}", url))?;

        Ok(())
    }

    async fn render_in(&self, browser: &Browser, query: &str, page_number: u32) -> Result<String> {
        let url = build_search_url(&self.store_url, query, page_number);
        info!("Rendering search page: {}", url);

        let page = browser.new_page("about:blank").await.context("Failed to create page")?;
        self.goto(&page, &url).await?;

        let final_url = page.url().await.ok().flatten().unwrap_or_else(|| url.clone());
        if let Some(fixed) = restore_page_param(&final_url, page_number) {
            debug!("Store dropped the page parameter, re-navigating to {}", fixed);
            self.goto(&page, &fixed).await?;
        }

        tokio::time::sleep(self.render_wait).await;

        let html = page.content().await.context("Failed to get page content")?;
        info!("Rendered HTML: {} characters", html.len());

        Ok(html)
    }
}

#[async_trait]
impl SearchRenderer for BrowserRenderer {
    async fn render(&self, query: &str, page: u32) -> Result<String> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) =
            Browser::launch(config).await.context("Failed to launch headless browser")?;

        let handle = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let result = self.render_in(&browser, query, page).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close browser: {}", e);
        }
        if let Err(e) = browser.wait().await {
            debug!("Browser process did not exit cleanly: {}", e);
        }
        handle.abort();

        result
    }
}
