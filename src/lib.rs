//! ai-product-scraper - LLM-assisted e-commerce product scraper
//!
//! Renders a store search page, asks an LLM for a regex that picks out the
//! product URLs, downloads those pages and has a second LLM call extract a
//! fixed-schema record per product.

pub mod commands;
pub mod config;
pub mod filters;
pub mod format;
pub mod llm;
pub mod store;

pub use config::Config;
pub use llm::models::ProductRecord;
pub use llm::{Product, RegexPattern};
pub use store::ProductPage;
