//! Data models for downloaded product pages.

use serde::{Deserialize, Serialize};

/// A product page reduced to what the extractor needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    /// URL the page was downloaded from
    pub url: String,
    /// Plain-text rendering of the page without scripts and styles
    pub text: String,
    /// Absolute image URLs in document order
    pub image_urls: Vec<String>,
}

impl ProductPage {
    /// Creates a page from its parts.
    pub fn new(url: impl Into<String>, text: impl Into<String>, image_urls: Vec<String>) -> Self {
        Self { url: url.into(), text: text.into(), image_urls }
    }

    /// Returns true if the page carried neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image_urls.is_empty()
    }

    /// Returns the first image URL, if any.
    pub fn first_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_page_new() {
        let page = ProductPage::new(
            "https://shop.test/product/1",
            "Phone X",
            vec!["https://img.test/1.jpg".to_string()],
        );
        assert_eq!(page.url, "https://shop.test/product/1");
        assert_eq!(page.first_image(), Some("https://img.test/1.jpg"));
        assert!(!page.is_empty());
    }

    #[test]
    fn test_product_page_empty() {
        let page = ProductPage::new("https://shop.test/product/1", "  \n ", Vec::new());
        assert!(page.is_empty());
        assert!(page.first_image().is_none());
    }
}
