//! Forward pagination to the last reachable listing page.
//!
//! Starting at the seed, each page is fetched and searched for the "next"
//! anchor. Its `href` is resolved against the current page and becomes the
//! next fetch target, after a fixed politeness pause. The walk stops at the
//! first page without a usable next link, or at the first page that cannot
//! be fetched.
//!
//! Two conditions abort the walk with
//! [`CrawlError::PaginationDidNotTerminate`]: a next link that points back
//! at an already visited page, and a walk longer than `max_pages`.

use crate::error::{CrawlError, NonTermination, Result};
use crate::fetch::PageFetcher;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Paginator {
    next_link: Selector,
    delay: Duration,
    max_pages: usize,
}

impl Paginator {
    pub fn new(next_link: Selector, delay: Duration, max_pages: usize) -> Self {
        Self {
            next_link,
            delay,
            max_pages,
        }
    }

    /// Follow next links from `seed` and return the last page URL reached.
    ///
    /// A fetch failure ends the walk without an error: the URL being fetched
    /// is still returned as the last page, matching "no further pages".
    #[instrument(level = "info", skip_all, fields(seed = %seed))]
    pub async fn find_terminal_page<F: PageFetcher>(&self, fetcher: &F, seed: &Url) -> Result<Url> {
        let mut current = seed.clone();
        let mut visited = HashSet::from([seed.clone()]);

        info!("Navigating to the last page");
        loop {
            let html = match fetcher.fetch(&current).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(url = %current, error = %e, "Failed to retrieve page; stopping here");
                    return Ok(current);
                }
            };

            let Some(next) = self.next_page(&html, &current) else {
                info!(url = %current, pages = visited.len(), "Last page identified");
                return Ok(current);
            };

            if visited.contains(&next) {
                return Err(self.did_not_terminate(current, visited.len(), NonTermination::Cycle));
            }
            if visited.len() >= self.max_pages {
                return Err(self.did_not_terminate(current, visited.len(), NonTermination::PageLimit));
            }

            visited.insert(next.clone());
            info!(url = %next, page = visited.len(), "Found page");
            current = next;
            sleep(self.delay).await;
        }
    }

    /// Resolved target of the page's next link, if it has a usable one.
    pub fn next_page(&self, html: &str, page_url: &Url) -> Option<Url> {
        let document = Html::parse_document(html);
        let href = document
            .select(&self.next_link)
            .next()?
            .value()
            .attr("href")?
            .trim();
        if href.is_empty() {
            return None;
        }

        match page_url.join(href) {
            Ok(mut next) => {
                // "#" on a disabled next button points back at this page
                next.set_fragment(None);
                Some(next)
            }
            Err(e) => {
                debug!(href, error = %e, "Next link cannot be resolved; treating as absent");
                None
            }
        }
    }

    fn did_not_terminate(&self, last: Url, pages: usize, reason: NonTermination) -> CrawlError {
        warn!(url = %last, pages, %reason, "Pagination did not terminate");
        CrawlError::PaginationDidNotTerminate {
            last: last.into(),
            pages,
            reason,
        }
    }
}
