//! Utility functions for text handling, logging and file system checks.

use crate::error::Result;
use scraper::ElementRef;
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Text content of an element with whitespace runs collapsed and trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_text(&el.text().collect::<String>())
}

/// Collapse whitespace and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut and get `"…(+N bytes)"`
/// appended, where N counts the dropped bytes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Ensure the directory that will hold `file_path` exists and is writable.
///
/// Creates the directory if needed, then writes and removes a probe file.
/// Run before crawling so a bad output path fails fast instead of after
/// every listing page has been fetched.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %file_path))]
pub async fn ensure_output_dir(file_path: &str) -> Result<()> {
    let dir = match Path::new(file_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => Path::new(".").to_path_buf(),
    };

    fs::create_dir_all(&dir).await?;
    // Small sync write with std fs; simpler error surface
    let probe_path = dir.join("..__probe_write__");
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!(dir = %dir.display(), "Output directory is writable");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééééé", 2);
        assert_eq!(result, "éé…(+6 bytes)");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("  Hello \n\t world  "), "Hello world");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_element_text_joins_nested_nodes() {
        let doc = Html::parse_fragment("<h2>  Rust <em>in</em>\n  production </h2>");
        let h2 = Selector::parse("h2").unwrap();
        let el = doc.select(&h2).next().unwrap();
        assert_eq!(element_text(el), "Rust in production");
    }

    #[tokio::test]
    async fn test_ensure_output_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/deeper/articles.json");

        ensure_output_dir(target.to_str().unwrap()).await.unwrap();

        assert!(dir.path().join("nested/deeper").is_dir());
        assert!(!dir.path().join("nested/deeper/..__probe_write__").exists());
    }
}
