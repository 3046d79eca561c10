//! Utility functions and helpers.

pub mod date;
pub mod html;
pub mod http;

use regex::Regex;
use url::Url;

use crate::error::Result;

/// Resolve an endpoint path against a base URL.
pub fn join_url(base: &Url, path: &str) -> Result<Url> {
    Ok(base.join(path)?)
}

/// Extract the numeric `id` query parameter from a link such as
/// `edit.php?id=123`. Relative links work too.
pub fn extract_query_id(href: &str) -> Option<i64> {
    let pattern = Regex::new(r"[?&]id=(\d+)").ok()?;
    pattern.captures(href)?.get(1)?.as_str().parse().ok()
}
