//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields so partial config files fill in the rest.

use crate::types::{LogLevel, SplitDirection};

// ── Primitive helpers ──────────────────────────────────────────────────────

pub fn bool_true() -> bool {
    true
}

// ── Navigation ─────────────────────────────────────────────────────────────

/// Path the shell falls back to when no tab remains open
pub fn default_path() -> String {
    "/dashboard".to_string()
}

pub fn split_direction() -> SplitDirection {
    SplitDirection::Right
}

// ── Logging ────────────────────────────────────────────────────────────────

pub fn log_level() -> LogLevel {
    LogLevel::Off
}
