//! CLI command implementations.

pub mod links;
pub mod scrape;

pub use links::LinksCommand;
pub use scrape::{derive_product_urls, ScrapeCommand, ScrapeReport};
