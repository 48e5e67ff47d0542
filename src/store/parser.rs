//! HTML parsing for search result links and product pages.

use crate::store::models::ProductPage;
use crate::store::selectors::{IMAGE, LINK, NOISE};
use anyhow::{Context, Result};
use scraper::Html;
use tracing::{debug, trace};

/// Line width for the plain-text rendering of product pages.
const TEXT_WIDTH: usize = 200;

/// Parses `html` and detaches every `script` and `style` element.
pub fn parse_clean(html: &str) -> Html {
    let mut document = Html::parse_document(html);

    let noise: Vec<_> = document.select(&NOISE).map(|element| element.id()).collect();
    for id in noise {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
}

/// Extracts every absolute link from a search results page.
///
/// Only hrefs starting with `http` are kept, compared as written (leading
/// whitespace disqualifies a link). Order follows the document and duplicates
/// are preserved.
pub fn extract_links(html: &str) -> Vec<String> {
    let document = parse_clean(html);

    let links: Vec<String> = document
        .select(&LINK)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with("http"))
        .map(String::from)
        .collect();

    debug!("Extracted {} absolute links", links.len());
    links
}

/// Extracts absolute image URLs from an already cleaned document.
pub fn extract_images(document: &Html) -> Vec<String> {
    document
        .select(&IMAGE)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| src.starts_with("http"))
        .map(String::from)
        .collect()
}

/// Reduces a downloaded product page to its text and image URLs.
///
/// `max_chars` caps the text length in characters; 0 keeps everything.
pub fn parse_product_page(url: &str, html: &str, max_chars: usize) -> Result<ProductPage> {
    let document = parse_clean(html);
    let image_urls = extract_images(&document);

    let cleaned = document.html();
    let text = html2text::from_read(cleaned.as_bytes(), TEXT_WIDTH)
        .with_context(|| format!("Failed to render page text: {}", url))?;
    let text = truncate_chars(text.trim(), max_chars);

    trace!("Product page {}: {} chars, {} images", url, text.chars().count(), image_urls.len());

    Ok(ProductPage::new(url, text, image_urls))
}

/// Cuts `text` to at most `max_chars` characters (0 = unlimited).
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return text.to_string();
    }

    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
