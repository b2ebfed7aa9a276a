//! Path-derived tab ids

use super::TabId;
use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9-]").expect("valid tab id regex"));
static DASH_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-{2,}").expect("valid dash regex"));

/// Base id for a path: leading slash stripped, characters outside
/// `[a-zA-Z0-9-]` replaced by `-`, dash runs collapsed, edge dashes trimmed.
/// Falls back to `tab` when nothing is left.
pub fn base_id(path: &str) -> String {
    let stripped = path.strip_prefix('/').unwrap_or(path);
    let replaced = DISALLOWED.replace_all(stripped, "-");
    let collapsed = DASH_RUN.replace_all(&replaced, "-");
    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        "tab".to_string()
    } else {
        trimmed.to_string()
    }
}

/// First of `base`, `base-1`, `base-2`, … for which `taken` is false
pub fn disambiguate(base: &str, taken: impl Fn(&str) -> bool) -> TabId {
    if !taken(base) {
        return TabId::new(base);
    }
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{base}-{n}");
        if !taken(&candidate) {
            return TabId::new(candidate);
        }
        n += 1;
    }
}
