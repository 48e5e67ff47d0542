//! ai-product-scraper - LLM-assisted e-commerce product scraper CLI

use ai_product_scraper::commands::{LinksCommand, ScrapeCommand};
use ai_product_scraper::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "ai-product-scraper",
    version,
    about = "LLM-assisted e-commerce product scraper",
    long_about = "Renders a store search page, lets an LLM derive the product URL pattern, \
                  and extracts structured product records from the matching pages."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Summary format printed to stdout
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SCRAPER_PROXY")]
    proxy: Option<String>,

    /// Fetch the search page with a plain GET instead of headless Chromium
    #[arg(long, global = true)]
    no_browser: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape products and write them to a JSON file
    #[command(alias = "s")]
    Scrape {
        /// Search term
        #[arg(default_value = "celulares")]
        query: String,

        /// Search results page
        #[arg(short, long)]
        page: Option<u32>,

        /// Number of products to extract
        #[arg(short, long)]
        max: Option<usize>,

        /// Output JSON file
        #[arg(short, long, env = "SCRAPER_OUTPUT")]
        output: Option<PathBuf>,
    },

    /// List the absolute links found on a search page
    #[command(alias = "l")]
    Links {
        /// Search term
        #[arg(default_value = "celulares")]
        query: String,

        /// Search results page
        #[arg(short, long)]
        page: Option<u32>,

        /// Only list links matching this regex
        #[arg(long)]
        pattern: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if cli.no_browser {
        config.headless = false;
    }

    match cli.command {
        Commands::Scrape { query, page, max, output } => {
            if let Some(page) = page {
                config.page = page;
            }
            if let Some(max) = max {
                config.max_products = max;
            }
            if let Some(output) = output {
                config.output = output;
            }

            let output_path = config.output.clone();
            let cmd = ScrapeCommand::new(config);
            let output = cmd.execute(&query).await?;

            println!("{}", output);
            eprintln!("Saved to {}", output_path.display());
        }

        Commands::Links { query, page, pattern } => {
            if let Some(page) = page {
                config.page = page;
            }

            let cmd = LinksCommand::new(config);
            let output = cmd.execute(&query, pattern.as_deref()).await?;
            println!("{}", output);
        }
    }

    Ok(())
}
