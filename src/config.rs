//! Crawl configuration.
//!
//! A [`CrawlConfig`] is resolved in three layers: built-in defaults, an
//! optional YAML file, then command-line overrides. The resolved value is
//! validated once and handed to the paginator and extractor at construction.
//!
//! ```yaml
//! seed_url: https://example.com/blog/
//! politeness_delay_ms: 500
//! batch_size: 5
//! container_selectors:
//!   - article
//!   - .blog-post
//! next_link_selector: a.next
//! max_pages: 200
//! listing_order: newest-first
//! output_path: articles.json
//! ```

use crate::cli::Cli;
use crate::error::{CrawlError, Result};
use clap::ValueEnum;
use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_SEED_URL: &str = "https://beyondchats.com/blogs/";

/// Order in which a listing page presents its articles.
///
/// The terminal page of a newest-first blog holds the oldest articles at the
/// bottom, so the last `batch_size` entries are kept. For an oldest-first
/// listing the first entries are kept instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ListingOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// First listing page.
    pub seed_url: String,
    /// Fixed pause between two listing page fetches.
    pub politeness_delay_ms: u64,
    /// Maximum number of records in the output.
    pub batch_size: usize,
    /// Container selectors, tried in order until one matches.
    pub container_selectors: Vec<String>,
    /// Selector of the "next page" anchor.
    pub next_link_selector: String,
    /// Maximum number of listing pages visited, seed included.
    pub max_pages: usize,
    pub listing_order: ListingOrder,
    pub output_path: String,
    pub user_agent: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            politeness_delay_ms: 1000,
            batch_size: 5,
            container_selectors: vec!["article".to_string(), ".blog-post".to_string()],
            next_link_selector: "a.next".to_string(),
            max_pages: 500,
            listing_order: ListingOrder::NewestFirst,
            output_path: "articles.json".to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CrawlConfig {
    /// Read a YAML config file. Keys missing from the file keep their defaults.
    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config = Self::from_yaml(&raw)?;
        info!(path, "Loaded crawl configuration");
        Ok(config)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Resolve the full configuration for a run from the parsed CLI.
    pub async fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::load(path).await?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(seed_url) = &cli.seed_url {
            self.seed_url = seed_url.clone();
        }
        if let Some(output) = &cli.output {
            self.output_path = output.clone();
        }
        if let Some(delay_ms) = cli.delay_ms {
            self.politeness_delay_ms = delay_ms;
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(max_pages) = cli.max_pages {
            self.max_pages = max_pages;
        }
        if let Some(order) = cli.order {
            self.listing_order = order;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.seed()?;
        if self.container_selectors.is_empty() {
            return Err(CrawlError::InvalidConfig(
                "container_selectors must name at least one selector".to_string(),
            ));
        }
        if self.max_pages == 0 {
            return Err(CrawlError::InvalidConfig(
                "max_pages must be at least 1".to_string(),
            ));
        }
        self.container_selectors()?;
        self.next_link_selector()?;
        Ok(())
    }

    pub fn seed(&self) -> Result<Url> {
        Url::parse(&self.seed_url).map_err(|source| CrawlError::InvalidUrl {
            url: self.seed_url.clone(),
            source,
        })
    }

    pub fn politeness_delay(&self) -> Duration {
        Duration::from_millis(self.politeness_delay_ms)
    }

    pub fn container_selectors(&self) -> Result<Vec<Selector>> {
        self.container_selectors
            .iter()
            .map(|s| parse_selector(s))
            .collect()
    }

    pub fn next_link_selector(&self) -> Result<Selector> {
        parse_selector(&self.next_link_selector)
    }
}

#[inline]
fn parse_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| CrawlError::InvalidSelector(sel_str.into()))
}
