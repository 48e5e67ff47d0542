//! URL filtering for candidate product pages.

pub mod pattern;

pub use pattern::UrlPattern;

/// Trait for filtering URLs.
pub trait Filter: Send + Sync {
    /// Returns true if the URL passes the filter.
    fn matches(&self, url: &str) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;

    /// Keeps the URLs that pass, preserving order.
    fn apply(&self, urls: &[String]) -> Vec<String> {
        urls.iter().filter(|url| self.matches(url)).cloned().collect()
    }
}
