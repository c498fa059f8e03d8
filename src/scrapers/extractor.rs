//! Article extraction from a listing page.
//!
//! Containers are located with an ordered list of selector tiers: the first
//! tier that matches anything wins, later tiers are not consulted. Inside each
//! container four fields are looked up independently:
//!
//! | Field | Source | When absent |
//! |-------|--------|-------------|
//! | `title` | first `h2`, else first `h3` | `"No Title"` |
//! | `source_url` | `href` of the first `a` | `None` |
//! | `content` | first `p` | `""` |
//! | `image_url` | `src` of the first `img` | `None` |
//!
//! Links and image sources are resolved against the page URL. A reference
//! that cannot be resolved makes that one article fail; it is logged and
//! dropped while its siblings are kept.

use crate::config::ListingOrder;
use crate::error::ArticleError;
use crate::models::{ArticleRecord, NO_TITLE, ResultSet};
use crate::utils::{element_text, truncate_for_log};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

static H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static H3: Lazy<Selector> = Lazy::new(|| Selector::parse("h3").unwrap());
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse("img").unwrap());

#[derive(Debug, Clone)]
pub struct Extractor {
    container_selectors: Vec<Selector>,
    order: ListingOrder,
}

impl Extractor {
    pub fn new(container_selectors: Vec<Selector>, order: ListingOrder) -> Self {
        Self {
            container_selectors,
            order,
        }
    }

    /// Extract the `limit` oldest articles of a listing page.
    ///
    /// For a newest-first listing these are the last `limit` containers, for
    /// an oldest-first listing the first `limit`. Document order is kept
    /// either way. Never fails: a page without containers gives an empty set.
    pub fn extract_oldest(&self, document: &Html, page_url: &Url, limit: usize) -> ResultSet {
        let articles = self.extract_all(document, page_url);
        let total = articles.len();
        let kept = keep_oldest(articles, limit, self.order);
        info!(
            found = total,
            kept = kept.len(),
            order = ?self.order,
            "Selected oldest articles"
        );
        kept
    }

    /// Every extractable article on the page, in document order.
    pub fn extract_all(&self, document: &Html, page_url: &Url) -> ResultSet {
        let containers = self.find_containers(document);

        containers
            .into_iter()
            .enumerate()
            .filter_map(|(index, container)| match extract_article(container, page_url) {
                Ok(record) => {
                    debug!(index, title = %truncate_for_log(&record.title, 80), "Parsed article");
                    Some(record)
                }
                Err(e) => {
                    warn!(index, error = %e, "Error parsing article; skipping");
                    None
                }
            })
            .collect()
    }

    fn find_containers<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        for (tier, selector) in self.container_selectors.iter().enumerate() {
            let found: Vec<_> = document.select(selector).collect();
            if !found.is_empty() {
                info!(count = found.len(), tier, "Found article containers");
                return found;
            }
        }
        warn!(
            tiers = self.container_selectors.len(),
            "No article containers matched any selector"
        );
        Vec::new()
    }
}

/// Build one record from a container element.
pub fn extract_article(
    container: ElementRef<'_>,
    page_url: &Url,
) -> Result<ArticleRecord, ArticleError> {
    let title = first_text(container, &H2)
        .or_else(|| first_text(container, &H3))
        .unwrap_or_else(|| NO_TITLE.to_string());

    let source_url = first_attr(container, &ANCHOR, "href")
        .map(|href| resolve(page_url, "href", href))
        .transpose()?;

    let content = first_text(container, &PARAGRAPH).unwrap_or_default();

    let image_url = first_attr(container, &IMAGE, "src")
        .map(|src| resolve(page_url, "src", src))
        .transpose()?;

    Ok(ArticleRecord {
        title,
        content,
        source_url,
        image_url,
    })
}

fn keep_oldest(mut articles: ResultSet, limit: usize, order: ListingOrder) -> ResultSet {
    match order {
        ListingOrder::NewestFirst => {
            let skip = articles.len().saturating_sub(limit);
            articles.split_off(skip)
        }
        ListingOrder::OldestFirst => {
            articles.truncate(limit);
            articles
        }
    }
}

/// Normalized text of the first match, if it has any.
fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Attribute of the first match. A first match lacking the attribute counts
/// as absent; later matches are not consulted.
fn first_attr<'a>(container: ElementRef<'a>, selector: &Selector, attr: &str) -> Option<&'a str> {
    container
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn resolve(base: &Url, field: &'static str, reference: &str) -> Result<String, ArticleError> {
    base.join(reference)
        .map(String::from)
        .map_err(|source| ArticleError::UnresolvableUrl {
            field,
            value: reference.to_string(),
            source,
        })
}
