//! JSON output of the extracted articles.
//!
//! The file is a UTF-8 JSON array indented with four spaces. Each object has
//! the fields `title`, `content`, `source_url`, `image_url` in that order;
//! missing links and images are written as `null`.

use crate::error::Result;
use crate::models::ArticleRecord;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::fs;
use tracing::{info, instrument};

/// Serialize records to the pretty JSON text written to disk.
pub fn to_pretty_json(articles: &[ArticleRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    articles.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the articles to `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(%path, count = articles.len()))]
pub async fn write_articles(articles: &[ArticleRecord], path: &str) -> Result<()> {
    let json = to_pretty_json(articles)?;
    fs::write(path, json).await?;
    info!("Wrote articles JSON");
    Ok(())
}
