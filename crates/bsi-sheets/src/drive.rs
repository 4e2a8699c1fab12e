//! Google Drive share-link parsing.

use std::sync::LazyLock;

use regex::Regex;

/// `https://drive.google.com/file/d/<id>/view?usp=sharing`
static PATH_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("valid drive path regex"));

/// `https://drive.google.com/uc?export=view&id=<id>` and `open?id=<id>`
static QUERY_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]id=([A-Za-z0-9_-]+)").expect("valid drive query regex"));

/// Extracts the Drive file id from a share link.
///
/// Path-style links take precedence over query-style ones. Returns `None`
/// for blank input or links matching neither shape.
#[must_use]
pub fn extract_drive_file_id(locator: &str) -> Option<String> {
    let locator = locator.trim();
    if locator.is_empty() {
        return None;
    }
    PATH_STYLE
        .captures(locator)
        .or_else(|| QUERY_STYLE.captures(locator))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
}
