//! Integration tests for link extraction, URL filtering and product page parsing.

use ai_product_scraper::filters::{Filter, UrlPattern};
use ai_product_scraper::store::parser;

const SEARCH_FIXTURE: &str = include_str!("fixtures/search_result.html");
const PRODUCT_FIXTURE: &str = include_str!("fixtures/product_page.html");

#[test]
fn test_extract_links_from_search_fixture() {
    let links = parser::extract_links(SEARCH_FIXTURE);

    // Relative, mailto and script-embedded links are not collected
    assert_eq!(links.len(), 7);
    assert_eq!(links[0], "https://www.falabella.com.co/falabella-co");
    assert!(links.iter().all(|l| l.starts_with("http")));
    assert!(!links.iter().any(|l| l.contains("script-only")));
    assert!(links.contains(&"https://www.falabella.com.co/falabella-co/search?Ntt=celulares&page=2".to_string()));
}

#[test]
fn test_pattern_selects_products_from_fixture() {
    let links = parser::extract_links(SEARCH_FIXTURE);
    let pattern = UrlPattern::new(r"falabella\.com\.co/falabella-co/product/\d+/").unwrap();

    let products = pattern.apply(&links);
    assert_eq!(products.len(), 3);
    assert!(products[0].contains("72834561"));
    assert!(products[1].contains("14421875"));
    assert!(products[2].contains("73001122"));
}

#[test]
fn test_parse_product_fixture() {
    let url = "https://www.falabella.com.co/falabella-co/product/72834561/Celular-Samsung-Galaxy-A15-128GB/72834562";
    let page = parser::parse_product_page(url, PRODUCT_FIXTURE, 0).unwrap();

    assert_eq!(page.url, url);
    assert!(page.text.contains("Celular Samsung Galaxy A15 128GB Azul"));
    assert!(page.text.contains("649.900"));
    assert!(page.text.contains("Cámara trasera"));
    assert!(!page.text.contains("__NEXT_DATA__"));
    assert!(!page.text.contains("font-size"));

    assert_eq!(
        page.image_urls,
        vec![
            "https://media.falabella.com.co/falabellaCO/72834561_1/public",
            "https://media.falabella.com.co/falabellaCO/72834561_2/public",
        ]
    );
}
