//! CSS selectors for store HTML parsing.
//!
//! Pages are treated generically: the product URL pattern comes from the LLM,
//! so only structural selectors live here.

use scraper::Selector;
use std::sync::LazyLock;

/// Anchors carrying a link target.
pub static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Images with a source attribute.
pub static IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img[src]").unwrap());

/// Elements removed before links, images or text are read.
pub static NOISE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script, style").unwrap());

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_selectors_compile() {
        let _ = &*LINK;
        let _ = &*IMAGE;
        let _ = &*NOISE;
    }

    #[test]
    fn test_link_requires_href() {
        let html = Html::parse_fragment(r#"<a href="https://a.test">x</a><a name="top">y</a>"#);
        assert_eq!(html.select(&LINK).count(), 1);
    }

    #[test]
    fn test_noise_matches_script_and_style() {
        let html = Html::parse_document(
            "<html><head><style>p{}</style><script>1</script></head><body><p>t</p></body></html>",
        );
        assert_eq!(html.select(&NOISE).count(), 2);
    }
}
