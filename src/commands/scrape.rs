//! Scrape command: search page -> URL pattern -> product pages -> records on disk.

use crate::config::Config;
use crate::filters::{Filter, UrlPattern};
use crate::format::{self, Formatter};
use crate::llm::models::ProductRecord;
use crate::llm::{OpenAiClient, ProductLlm};
use crate::store::{parser, renderer, ProductFetch, SearchRenderer, StoreClient};
use anyhow::{Context, Result};
use tracing::{debug, info, warn};

/// Outcome of one pipeline run.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    /// Pattern that selected the candidates
    pub pattern: String,
    /// Absolute links found on the search page
    pub links: usize,
    /// Product URLs selected by the pattern, in page order
    pub candidates: Vec<String>,
    /// Extracted records, in candidate order
    pub records: Vec<ProductRecord>,
    /// Candidates dropped because download or extraction failed
    pub skipped: usize,
}

/// Requests patterns until one selects at least one URL.
///
/// An invalid regex or a pattern matching nothing uses up an attempt. Fails
/// immediately when there are no links, and after `max_attempts` misses.
pub async fn derive_product_urls(
    llm: &dyn ProductLlm,
    links: &[String],
    max_attempts: u32,
) -> Result<(UrlPattern, Vec<String>)> {
    if links.is_empty() {
        anyhow::bail!("No absolute links found on the search page");
    }

    let max_attempts = max_attempts.max(1);

    for attempt in 1..=max_attempts {
        let raw = llm.pattern(links).await.context("Failed to obtain URL pattern")?;

        let pattern = match UrlPattern::new(&raw) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Attempt {}/{}: {:#}", attempt, max_attempts, e);
                continue;
            }
        };

        let matched = pattern.apply(links);
        if matched.is_empty() {
            warn!("Attempt {}/{}: pattern {} matched no links", attempt, max_attempts, raw);
            continue;
        }

        info!("{} product URLs identified with {}", matched.len(), pattern.description());
        return Ok((pattern, matched));
    }

    anyhow::bail!("No product URLs matched after {} pattern attempts", max_attempts)
}

/// Executes the full scrape.
pub struct ScrapeCommand {
    config: Config,
}

impl ScrapeCommand {
    /// Creates a new scrape command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline, writes the output file and returns formatted output.
    pub async fn execute(&self, query: &str) -> Result<String> {
        let llm = OpenAiClient::new(&self.config)?;
        let store = StoreClient::new(&self.config).context("Failed to create HTTP client")?;
        let renderer = renderer::from_config(&self.config)?;

        self.execute_with(renderer.as_ref(), &store, &llm, query).await
    }

    /// Runs the pipeline with provided clients (for testing).
    pub async fn execute_with(
        &self,
        renderer: &dyn SearchRenderer,
        fetcher: &dyn ProductFetch,
        llm: &dyn ProductLlm,
        query: &str,
    ) -> Result<String> {
        let report = self.collect(renderer, fetcher, llm, query).await?;

        format::write_json(&self.config.output, &report.records)?;
        info!("Saved {} records to {}", report.records.len(), self.config.output.display());

        if report.skipped > 0 {
            warn!("{} of {} products skipped", report.skipped, report.records.len() + report.skipped);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_records(&report.records))
    }

    /// Runs the pipeline without persisting anything.
    pub async fn collect(
        &self,
        renderer: &dyn SearchRenderer,
        fetcher: &dyn ProductFetch,
        llm: &dyn ProductLlm,
        query: &str,
    ) -> Result<ScrapeReport> {
        info!("Searching for: {} (page {})", query, self.config.page);

        let html = renderer.render(query, self.config.page).await?;
        let links = parser::extract_links(&html);

        let (pattern, candidates) =
            derive_product_urls(llm, &links, self.config.max_pattern_attempts).await?;

        let mut records = Vec::new();
        let mut skipped = 0;

        for url in candidates.iter().take(self.config.max_products) {
            match self.process(fetcher, llm, url).await {
                Ok(record) => {
                    debug!("Extracted {}: {}", record.id, record.title);
                    records.push(record);
                }
                Err(e) => {
                    warn!("Skipping {}: {:#}", url, e);
                    skipped += 1;
                }
            }
        }

        Ok(ScrapeReport {
            pattern: pattern.as_str().to_string(),
            links: links.len(),
            candidates,
            records,
            skipped,
        })
    }

    /// Downloads one product page and extracts its record.
    async fn process(
        &self,
        fetcher: &dyn ProductFetch,
        llm: &dyn ProductLlm,
        url: &str,
    ) -> Result<ProductRecord> {
        let html = fetcher.fetch(url).await?;
        let page = parser::parse_product_page(url, &html, self.config.max_page_chars)?;

        if page.is_empty() {
            warn!("Product page {} has no text or images", url);
        }

        let product = llm.extract(&page).await?;
        Ok(product.into())
    }
}
