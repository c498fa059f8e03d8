//! Error types for the crawler.
//!
//! [`CrawlError`] covers everything that can stop or degrade a run. Most of
//! its variants are recovered locally (a failed page fetch simply ends
//! pagination); only configuration problems, runaway pagination and output
//! I/O reach `main` as fatal.
//!
//! [`ArticleError`] is scoped to a single article container: the extractor
//! drops the offending article and keeps going.

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrawlError>;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Invalid URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Pagination did not terminate after {pages} pages ({reason}), last page {last}")]
    PaginationDidNotTerminate {
        last: String,
        pages: usize,
        reason: NonTermination,
    },

    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why the paginator gave up instead of reaching a page without a next link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonTermination {
    /// A next link pointed back at a page that was already visited.
    Cycle,
    /// `max_pages` listing pages were visited and another next link was found.
    PageLimit,
}

impl fmt::Display for NonTermination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NonTermination::Cycle => f.write_str("next link revisits an earlier page"),
            NonTermination::PageLimit => f.write_str("page limit reached"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Cannot resolve {field} {value:?} against the page URL: {source}")]
    UnresolvableUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_termination_message() {
        let err = CrawlError::PaginationDidNotTerminate {
            last: "https://example.com/page/3".to_string(),
            pages: 3,
            reason: NonTermination::Cycle,
        };
        let msg = err.to_string();
        assert!(msg.contains("after 3 pages"));
        assert!(msg.contains("revisits an earlier page"));
        assert!(msg.ends_with("https://example.com/page/3"));
    }

    #[test]
    fn test_invalid_utf8_converts() {
        fn decode(bytes: Vec<u8>) -> Result<String> {
            Ok(String::from_utf8(bytes)?)
        }

        let err = decode(vec![b'[', 0xff, b']']).unwrap_err();
        assert!(matches!(err, CrawlError::Encoding(_)));
        assert!(err.to_string().starts_with("Output is not valid UTF-8"));
    }

    #[test]
    fn test_article_error_names_field() {
        let source = url::Url::parse("http://[::1").unwrap_err();
        let err = ArticleError::UnresolvableUrl {
            field: "href",
            value: "http://[::1".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("Cannot resolve href"));
    }
}
