//! Path normalization and classification
//!
//! Every navigation path the shell sees goes through `normalize_path` before
//! it is compared with tab paths, and through `classify` to get the label and
//! kind shown in the tab bar. Both functions are total.

mod classify;

pub use classify::{Classification, Route, classify, title_case};

/// Path used when a navigation target is empty
pub const DEFAULT_PATH: &str = "/dashboard";

/// Normalize a relative navigation path.
///
/// - surrounding whitespace, `?query` and `#fragment` are dropped
/// - repeated slashes collapse and a trailing slash is removed
/// - the result always has a leading slash
/// - empty input (or a bare `/`) becomes [`DEFAULT_PATH`]
pub fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    let end = trimmed.find(['?', '#']).unwrap_or(trimmed.len());
    let without_query = &trimmed[..end];

    let segments: Vec<&str> = without_query
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    if segments.is_empty() {
        return DEFAULT_PATH.to_string();
    }

    let mut path = String::with_capacity(without_query.len() + 1);
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Split a normalized path into its segments
pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}
