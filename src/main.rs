//! # Blog Crawler
//!
//! Walks a blog's paginated listing forward to its last page and saves the
//! oldest article summaries found there as a JSON array.
//!
//! ## Usage
//!
//! ```sh
//! blog_crawler -s https://example.com/blog/ -o articles.json
//! ```
//!
//! ## Architecture
//!
//! The run is strictly sequential:
//! 1. **Pagination**: follow "next" links from the seed page, pausing between
//!    fetches, until a page has no next link or cannot be fetched
//! 2. **Extraction**: fetch that last page again and pull title, excerpt, link
//!    and image out of each article container
//! 3. **Output**: keep the oldest `batch_size` articles and write them as JSON
//!
//! ## Exit status
//!
//! - `0`: at least one article written
//! - `2`: the run completed but found no articles (an empty array is written)
//! - `1`: invalid configuration, runaway pagination or an output error

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod crawler;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use config::CrawlConfig;
use crawler::Crawler;
use fetch::HttpFetcher;
use outputs::json;
use utils::ensure_output_dir;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("blog_crawler starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let status = match run(&args).await {
        Ok(0) => {
            warn!("No articles found; wrote an empty result");
            ExitCode::from(2)
        }
        Ok(count) => {
            info!(count, "Scraping complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Crawl failed");
            ExitCode::FAILURE
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    status
}

/// Resolve configuration, crawl, and write the output file.
///
/// Returns the number of articles written.
#[instrument(level = "info", skip_all)]
async fn run(args: &Cli) -> error::Result<usize> {
    let config = CrawlConfig::resolve(args).await?;
    info!(
        seed = %config.seed_url,
        delay_ms = config.politeness_delay_ms,
        batch_size = config.batch_size,
        max_pages = config.max_pages,
        output = %config.output_path,
        "Resolved crawl configuration"
    );

    // Early check: the output location must be writable before any fetching
    if let Err(e) = ensure_output_dir(&config.output_path).await {
        error!(
            path = %config.output_path,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&config.user_agent)?;
    let crawler = Crawler::new(&config, fetcher)?;
    let outcome = crawler.run().await?;
    info!(
        last_page = %outcome.terminal_page,
        count = outcome.articles.len(),
        "Extracted articles from last page"
    );

    json::write_articles(&outcome.articles, &config.output_path).await?;
    info!(path = %config.output_path, "Data saved");

    Ok(outcome.articles.len())
}
