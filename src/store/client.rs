//! HTTP client for store requests using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::store::renderer::SearchRenderer;
use crate::store::search::build_search_url;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;
use wreq_util::Emulation;

/// Trait for product page downloads - enables mocking for tests.
#[async_trait]
pub trait ProductFetch: Send + Sync {
    /// Downloads a product page and returns its HTML.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Store HTTP client with browser impersonation.
pub struct StoreClient {
    client: Client,
    store_url: String,
}

impl StoreClient {
    /// Creates a new store client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client, store_url: config.store_url.clone() })
    }

    /// Performs a single GET request. Non-success statuses are errors.
    async fn get(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8")
            .header("Accept-Language", "es-CO,es;q=0.9,en;q=0.8")
            .header("Cache-Control", "no-cache")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            anyhow::bail!("Request to {} failed with status: {}", url, status);
        }

        response.text().await.context("Failed to read response body")
    }
}

#[async_trait]
impl ProductFetch for StoreClient {
    async fn fetch(&self, url: &str) -> Result<String> {
        info!("Fetching product page: {}", url);
        self.get(url).await
    }
}

/// Plain-HTTP rendering: no JavaScript runs, so client-rendered listings may be missing.
#[async_trait]
impl SearchRenderer for StoreClient {
    async fn render(&self, query: &str, page: u32) -> Result<String> {
        let url = build_search_url(&self.store_url, query, page);

        info!("Fetching search page without browser: {}", url);
        self.get(&url).await
    }
}
