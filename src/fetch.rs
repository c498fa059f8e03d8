//! Page fetching.
//!
//! The paginator and the crawler only need "give me the markup behind this
//! URL", so that capability sits behind the [`PageFetcher`] trait:
//! - [`HttpFetcher`]: real HTTP GET via `reqwest`, 2xx only
//! - `testing::StaticFetcher`: in-memory page map for tests

use crate::error::{CrawlError, Result};
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, instrument};
use url::Url;

/// Fetch the HTML body of one page.
///
/// Any non-success outcome is an error; callers decide whether that error is
/// fatal.
pub trait PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(CrawlError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<String> {
        let t0 = Instant::now();
        let request_err = |source| CrawlError::Request {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_err)?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().await.map_err(request_err)?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}
