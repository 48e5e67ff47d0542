//! Search page rendering seam.

use crate::config::Config;
#[cfg(feature = "headless")]
use crate::store::browser::BrowserRenderer;
use crate::store::client::StoreClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
#[cfg(not(feature = "headless"))]
use tracing::warn;

/// Produces the final HTML of a search results page - enables mocking for tests.
#[async_trait]
pub trait SearchRenderer: Send + Sync {
    /// Renders results page `page` for `query` and returns its HTML.
    async fn render(&self, query: &str, page: u32) -> Result<String>;
}

/// Picks the renderer for `config`: headless Chromium when enabled and compiled in,
/// otherwise a plain GET through [`StoreClient`].
pub fn from_config(config: &Config) -> Result<Box<dyn SearchRenderer>> {
    #[cfg(feature = "headless")]
    if config.headless {
        return Ok(Box::new(BrowserRenderer::new(config)));
    }

    #[cfg(not(feature = "headless"))]
    if config.headless {
        warn!("Built without the `headless` feature, fetching the search page over plain HTTP");
    }

    Ok(Box::new(StoreClient::new(config).context("Failed to create HTTP client")?))
}
