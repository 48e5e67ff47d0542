//! Store-side modules: search URLs, page rendering, product downloads and HTML parsing.

#[cfg(feature = "headless")]
pub mod browser;
pub mod client;
pub mod models;
pub mod parser;
pub mod renderer;
pub mod search;
pub mod selectors;

#[cfg(feature = "headless")]
pub use browser::BrowserRenderer;
pub use client::{ProductFetch, StoreClient};
pub use models::ProductPage;
pub use renderer::SearchRenderer;
