//! Command-line interface definitions for the blog crawler.
//!
//! Every flag is optional. Values given here override the YAML config file,
//! which in turn overrides the built-in defaults (see [`crate::config`]).

use crate::config::ListingOrder;
use clap::Parser;

/// Command-line arguments for the blog crawler.
///
/// # Examples
///
/// ```sh
/// # Crawl the default blog and write ./articles.json
/// blog_crawler
///
/// # Another blog, faster, ten articles
/// blog_crawler -s https://example.com/blog/ --delay-ms 250 -n 10 -o out/articles.json
///
/// # Everything from a config file, output path overridden
/// blog_crawler -c crawl.yaml -o /tmp/articles.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML crawl configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// First listing page to start paginating from
    #[arg(short, long, env = "CRAWL_SEED_URL")]
    pub seed_url: Option<String>,

    /// Path of the JSON file to write
    #[arg(short, long, env = "CRAWL_OUTPUT")]
    pub output: Option<String>,

    /// Pause between listing page fetches, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Number of articles to keep from the last page
    #[arg(short = 'n', long)]
    pub batch_size: Option<usize>,

    /// Maximum number of listing pages to visit before giving up
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Order in which a listing page shows its articles
    #[arg(long, value_enum)]
    pub order: Option<ListingOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_are_empty() {
        let cli = Cli::parse_from(["blog_crawler"]);

        assert!(cli.config.is_none());
        assert!(cli.output.is_none());
        assert!(cli.delay_ms.is_none());
        assert!(cli.batch_size.is_none());
        assert!(cli.order.is_none());
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from([
            "blog_crawler",
            "--config",
            "crawl.yaml",
            "--seed-url",
            "https://example.com/blog/",
            "--output",
            "./out.json",
            "--delay-ms",
            "250",
            "--max-pages",
            "20",
            "--order",
            "oldest-first",
        ]);

        assert_eq!(cli.config.as_deref(), Some("crawl.yaml"));
        assert_eq!(cli.seed_url.as_deref(), Some("https://example.com/blog/"));
        assert_eq!(cli.output.as_deref(), Some("./out.json"));
        assert_eq!(cli.delay_ms, Some(250));
        assert_eq!(cli.max_pages, Some(20));
        assert_eq!(cli.order, Some(ListingOrder::OldestFirst));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "blog_crawler",
            "-s",
            "https://example.com/",
            "-o",
            "/tmp/a.json",
            "-n",
            "3",
        ]);

        assert_eq!(cli.seed_url.as_deref(), Some("https://example.com/"));
        assert_eq!(cli.output.as_deref(), Some("/tmp/a.json"));
        assert_eq!(cli.batch_size, Some(3));
    }
}
