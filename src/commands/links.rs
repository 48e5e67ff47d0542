//! Links command: render a search page and list its absolute links.

use crate::config::Config;
use crate::filters::{Filter, UrlPattern};
use crate::store::{parser, renderer, SearchRenderer};
use anyhow::Result;
use tracing::info;

/// Lists the links the pattern requester would see.
pub struct LinksCommand {
    config: Config,
}

impl LinksCommand {
    /// Creates a new links command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Renders the search page and returns one link per line.
    pub async fn execute(&self, query: &str, pattern: Option<&str>) -> Result<String> {
        let renderer = renderer::from_config(&self.config)?;
        self.execute_with(renderer.as_ref(), query, pattern).await
    }

    /// Lists links with a provided renderer (for testing).
    ///
    /// With `pattern`, only matching links are listed.
    pub async fn execute_with(
        &self,
        renderer: &dyn SearchRenderer,
        query: &str,
        pattern: Option<&str>,
    ) -> Result<String> {
        let html = renderer.render(query, self.config.page).await?;
        let mut links = parser::extract_links(&html);

        if let Some(pattern) = pattern {
            let pattern = UrlPattern::new(pattern)?;
            let total = links.len();
            links = pattern.apply(&links);
            info!("{} of {} links kept by {}", links.len(), total, pattern.description());
        }

        Ok(links.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct MockRenderer;

    #[async_trait]
    impl SearchRenderer for MockRenderer {
        async fn render(&self, query: &str, page: u32) -> Result<String> {
            Ok(format!(
                r#"<html><body>
                    <a href="https://shop.test/product/1?q={query}">one</a>
                    <a href="https://shop.test/page/{page}">page</a>
                    <a href="/local">local</a>
                </body></html>"#
            ))
        }
    }

    #[tokio::test]
    async fn test_links_all() {
        let cmd = LinksCommand::new(Config { page: 2, ..Config::default() });
        let output = cmd.execute_with(&MockRenderer, "tv", None).await.unwrap();

        assert_eq!(output, "https://shop.test/product/1?q=tv\nhttps://shop.test/page/2");
    }

    #[tokio::test]
    async fn test_links_filtered() {
        let cmd = LinksCommand::new(Config::default());
        let output = cmd.execute_with(&MockRenderer, "tv", Some("/product/")).await.unwrap();

        assert_eq!(output, "https://shop.test/product/1?q=tv");
    }

    #[tokio::test]
    async fn test_links_invalid_pattern() {
        let cmd = LinksCommand::new(Config::default());
        assert!(cmd.execute_with(&MockRenderer, "tv", Some("(")).await.is_err());
    }
}
