//! End-to-end crawl: paginate, re-fetch the last page, extract.

use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::models::ResultSet;
use crate::scrapers::extractor::Extractor;
use crate::scrapers::paginator::Paginator;
use scraper::Html;
use tracing::{info, instrument, warn};
use url::Url;

/// Outcome of one crawl run.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub terminal_page: Url,
    pub articles: ResultSet,
}

#[derive(Debug)]
pub struct Crawler<F> {
    fetcher: F,
    seed: Url,
    batch_size: usize,
    paginator: Paginator,
    extractor: Extractor,
}

impl<F: PageFetcher> Crawler<F> {
    /// Compile the configured selectors and bind them to `fetcher`.
    pub fn new(config: &CrawlConfig, fetcher: F) -> Result<Self> {
        Ok(Self {
            fetcher,
            seed: config.seed()?,
            batch_size: config.batch_size,
            paginator: Paginator::new(
                config.next_link_selector()?,
                config.politeness_delay(),
                config.max_pages,
            ),
            extractor: Extractor::new(config.container_selectors()?, config.listing_order),
        })
    }

    /// Run pagination then extraction.
    ///
    /// Only a pagination that does not terminate is an error here. If the
    /// terminal page cannot be fetched again the result is simply empty.
    #[instrument(level = "info", skip_all, fields(seed = %self.seed))]
    pub async fn run(&self) -> Result<CrawlOutcome> {
        let terminal_page = self
            .paginator
            .find_terminal_page(&self.fetcher, &self.seed)
            .await?;

        let articles = match self.fetcher.fetch(&terminal_page).await {
            Ok(html) => {
                let document = Html::parse_document(&html);
                self.extractor
                    .extract_oldest(&document, &terminal_page, self.batch_size)
            }
            Err(e) => {
                warn!(url = %terminal_page, error = %e, "Could not fetch last page; no articles extracted");
                ResultSet::new()
            }
        };

        info!(url = %terminal_page, count = articles.len(), "Crawl finished");
        Ok(CrawlOutcome {
            terminal_page,
            articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListingOrder;
    use crate::error::CrawlError;
    use crate::fetch::testing::StaticFetcher;

    fn config() -> CrawlConfig {
        CrawlConfig {
            seed_url: "https://b.example/blogs/".to_string(),
            politeness_delay_ms: 0,
            ..CrawlConfig::default()
        }
    }

    fn listing(range: std::ops::RangeInclusive<usize>, next: Option<&str>) -> String {
        let posts: String = range
            .map(|n| format!(r#"<article><h2>Post {n}</h2><a href="/blogs/post-{n}/">read</a><p>Body {n}</p></article>"#))
            .collect();
        let nav = next
            .map(|href| format!(r#"<a class="next" href="{href}">Next</a>"#))
            .unwrap_or_default();
        format!("<html><body>{posts}<nav>{nav}</nav></body></html>")
    }

    #[tokio::test]
    async fn test_run_extracts_oldest_from_last_page() {
        let fetcher = StaticFetcher::new()
            .with_page("https://b.example/blogs/", listing(1..=10, Some("page/2/")))
            .with_page("https://b.example/blogs/page/2/", listing(11..=17, None));

        let crawler = Crawler::new(&config(), fetcher).unwrap();
        let outcome = crawler.run().await.unwrap();

        assert_eq!(outcome.terminal_page.as_str(), "https://b.example/blogs/page/2/");
        let titles: Vec<_> = outcome.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 13", "Post 14", "Post 15", "Post 16", "Post 17"]);
        assert_eq!(
            outcome.articles[0].source_url.as_deref(),
            Some("https://b.example/blogs/post-13/")
        );
        // seed, page 2, then page 2 again for extraction
        assert_eq!(crawler.fetcher.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_run_with_batch_size_and_order() {
        let fetcher = StaticFetcher::new().with_page("https://b.example/blogs/", listing(1..=6, None));
        let config = CrawlConfig {
            batch_size: 2,
            listing_order: ListingOrder::OldestFirst,
            ..config()
        };

        let outcome = Crawler::new(&config, fetcher).unwrap().run().await.unwrap();

        let titles: Vec<_> = outcome.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 1", "Post 2"]);
    }

    #[tokio::test]
    async fn test_unreachable_last_page_gives_empty_result() {
        let fetcher = StaticFetcher::new().with_page("https://b.example/blogs/", listing(1..=3, Some("/gone/")));

        let outcome = Crawler::new(&config(), fetcher).unwrap().run().await.unwrap();

        assert_eq!(outcome.terminal_page.as_str(), "https://b.example/gone/");
        assert!(outcome.articles.is_empty());
    }

    #[tokio::test]
    async fn test_cycle_propagates() {
        let fetcher = StaticFetcher::new().with_page("https://b.example/blogs/", listing(1..=3, Some("/blogs/")));

        let result = Crawler::new(&config(), fetcher).unwrap().run().await;

        assert!(matches!(result, Err(CrawlError::PaginationDidNotTerminate { .. })));
    }

    #[test]
    fn test_new_rejects_bad_selector() {
        let config = CrawlConfig {
            container_selectors: vec!["article".to_string(), "div[".to_string()],
            ..config()
        };

        let result = Crawler::new(&config, StaticFetcher::new());

        assert!(matches!(result, Err(CrawlError::InvalidSelector(s)) if s == "div["));
    }
}
