//! Regex-based product URL selection.

use super::Filter;
use anyhow::{Context, Result};
use regex_lite::Regex;

/// A compiled product URL pattern.
///
/// Matching is unanchored: a URL passes if the pattern occurs anywhere in it.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    regex: Regex,
}

impl UrlPattern {
    /// Compiles `pattern`, trimming surrounding whitespace.
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            anyhow::bail!("Empty URL pattern");
        }

        let regex =
            Regex::new(pattern).with_context(|| format!("Invalid URL pattern: {}", pattern))?;

        Ok(Self { regex })
    }

    /// Returns the source pattern.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Filter for UrlPattern {
    fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    fn description(&self) -> String {
        format!("URL matches /{}/", self.regex.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls() -> Vec<String> {
        [
            "https://www.falabella.com.co/falabella-co/product/72834561/celular-galaxy-a15/72834562",
            "https://www.falabella.com.co/falabella-co/category/cat1660941/celulares",
            "https://www.falabella.com.co/falabella-co/product/14421875/iphone-13/14421876",
            "https://www.falabella.com.co/falabella-co/page/ayuda",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_pattern_selects_products_in_order() {
        let pattern = UrlPattern::new(r"/product/\d+/").unwrap();
        let matched = pattern.apply(&urls());

        assert_eq!(matched.len(), 2);
        assert!(matched[0].contains("72834561"));
        assert!(matched[1].contains("14421875"));
    }

    #[test]
    fn test_pattern_is_unanchored() {
        let pattern = UrlPattern::new("iphone").unwrap();
        assert!(pattern.matches("https://shop.test/product/1/iphone-13/2"));
    }

    #[test]
    fn test_anchored_pattern_from_llm() {
        let pattern = UrlPattern::new(
            r"^https://www\.falabella\.com\.co/falabella-co/product/\d+/[^/]+/\d+$",
        )
        .unwrap();
        assert_eq!(pattern.apply(&urls()).len(), 2);
    }

    #[test]
    fn test_no_matches() {
        let pattern = UrlPattern::new(r"/producto/\d+").unwrap();
        assert!(pattern.apply(&urls()).is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = UrlPattern::new(r"/product/(\d+").unwrap_err().to_string();
        assert!(err.contains("Invalid URL pattern"));
    }

    #[test]
    fn test_empty_pattern() {
        assert!(UrlPattern::new("   ").is_err());
    }

    #[test]
    fn test_pattern_is_trimmed() {
        let pattern = UrlPattern::new("  /product/\n").unwrap();
        assert_eq!(pattern.as_str(), "/product/");
        assert_eq!(pattern.description(), "URL matches //product//");
    }
}
