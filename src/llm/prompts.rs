//! Prompt templates for pattern derivation and product extraction.

use crate::store::ProductPage;

/// Asks for a single regex that selects product-detail URLs of `store`.
pub fn pattern_prompt(store: &str, urls: &[String]) -> String {
    format!(
        "Analyze the following URLs and return only the regular expression pattern \
         that identifies the product pages of the {} domain.\n\nURLs:\n{}",
        store,
        urls.join("\n")
    )
}

/// Asks for the product fields found in a downloaded page.
pub fn extraction_prompt(page: &ProductPage) -> String {
    format!(
        "Extract the id, title, price, image url and a short description.\n\n\
         Product URL: {}\n\
         Page text:\n{}\n\
         Image URLs: {}",
        page.url,
        page.text,
        page.image_urls.join(", ")
    )
}
