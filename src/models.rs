//! Data model for extracted articles.
//!
//! An [`ArticleRecord`] is a plain value object: it is built once by the
//! extractor, serialized once by the JSON writer and never mutated in
//! between. Field declaration order is the serialized field order.

use serde::{Deserialize, Serialize};

/// Title used when an article container has no usable `h2`/`h3` heading.
pub const NO_TITLE: &str = "No Title";

/// One article summary taken from a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Heading text, or [`NO_TITLE`].
    pub title: String,
    /// Text of the first paragraph; empty when the container has none.
    pub content: String,
    /// Absolute URL of the first link in the container.
    pub source_url: Option<String>,
    /// Absolute URL of the first image in the container.
    pub image_url: Option<String>,
}

/// Final output of a run, at most `batch_size` records long.
pub type ResultSet = Vec<ArticleRecord>;
