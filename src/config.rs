//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Search endpoint of the default store (Falabella Colombia).
pub const DEFAULT_STORE_URL: &str = "https://www.falabella.com.co/falabella-co/search";

/// Default OpenAI-compatible API root.
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Search endpoint of the store
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// Search results page to scrape
    #[serde(default = "default_page")]
    pub page: u32,

    /// Number of candidate product URLs to process
    #[serde(default = "default_max_products")]
    pub max_products: usize,

    /// Where the product records are written
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Summary format printed to stdout
    #[serde(default)]
    pub format: OutputFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Render the search page in headless Chromium instead of a plain GET
    #[serde(default = "default_true")]
    pub headless: bool,

    /// Navigation timeout for the headless browser in milliseconds
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Fixed wait after navigation so client-side rendering can finish
    #[serde(default = "default_render_wait_ms")]
    pub render_wait_ms: u64,

    /// Timeout for product page downloads in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Page text is cut to this many characters before extraction (0 = no limit)
    #[serde(default = "default_max_page_chars")]
    pub max_page_chars: usize,

    /// API key for the LLM endpoint
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// API root for chat completions
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Model used to derive the product URL pattern
    #[serde(default = "default_pattern_model")]
    pub pattern_model: String,

    /// Model used to extract product records
    #[serde(default = "default_extract_model")]
    pub extract_model: String,

    /// How many patterns to request before giving up
    #[serde(default = "default_max_pattern_attempts")]
    pub max_pattern_attempts: u32,
}

fn default_store_url() -> String {
    DEFAULT_STORE_URL.to_string()
}

fn default_page() -> u32 {
    1
}

fn default_max_products() -> usize {
    3
}

fn default_output() -> PathBuf {
    PathBuf::from("scrapping_producto.json")
}

fn default_true() -> bool {
    true
}

fn default_navigation_timeout_ms() -> u64 {
    15_000
}

fn default_render_wait_ms() -> u64 {
    3_000
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_page_chars() -> usize {
    20_000
}

fn default_openai_base_url() -> String {
    DEFAULT_OPENAI_BASE_URL.to_string()
}

fn default_pattern_model() -> String {
    "gpt-4.1".to_string()
}

fn default_extract_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_pattern_attempts() -> u32 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            page: default_page(),
            max_products: default_max_products(),
            output: default_output(),
            format: OutputFormat::Table,
            proxy: None,
            headless: true,
            navigation_timeout_ms: default_navigation_timeout_ms(),
            render_wait_ms: default_render_wait_ms(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_page_chars: default_max_page_chars(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            pattern_model: default_pattern_model(),
            extract_model: default_extract_model(),
            max_pattern_attempts: default_max_pattern_attempts(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("ai-product-scraper").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            if !key.trim().is_empty() {
                self.openai_api_key = Some(key);
            }
        }

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.openai_base_url = base_url;
            }
        }

        if let Ok(proxy) = std::env::var("SCRAPER_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(output) = std::env::var("SCRAPER_OUTPUT") {
            self.output = PathBuf::from(output);
        }

        self
    }
}

/// Output format for the stdout summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use: table, json, markdown, csv", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}
