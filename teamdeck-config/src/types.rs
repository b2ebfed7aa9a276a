//! Layout and logging types shared between the config crate and the shell.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Layout Types
// ============================================================================

/// Layout region a tab is displayed in
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaneId {
    /// Main pane, always present
    #[default]
    Primary,
    /// Second pane, present while a split view exists
    Secondary,
}

impl PaneId {
    /// The opposite pane
    pub fn other(self) -> Self {
        match self {
            PaneId::Primary => PaneId::Secondary,
            PaneId::Secondary => PaneId::Primary,
        }
    }

    /// Both panes in display order
    pub fn all() -> [PaneId; 2] {
        [PaneId::Primary, PaneId::Secondary]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaneId::Primary => "primary",
            PaneId::Secondary => "secondary",
        }
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Screen edge the mirrored pane of a split view is placed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplitDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl SplitDirection {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SplitDirection::Up => "Up",
            SplitDirection::Down => "Down",
            SplitDirection::Left => "Left",
            SplitDirection::Right => "Right",
        }
    }

    /// All directions for UI iteration
    pub fn all() -> &'static [SplitDirection] {
        &[
            SplitDirection::Up,
            SplitDirection::Down,
            SplitDirection::Left,
            SplitDirection::Right,
        ]
    }
}

impl std::str::FromStr for SplitDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(SplitDirection::Up),
            "down" => Ok(SplitDirection::Down),
            "left" => Ok(SplitDirection::Left),
            "right" => Ok(SplitDirection::Right),
            other => Err(format!("unknown split direction '{other}'")),
        }
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Log level for debug logging to file.
///
/// Environment variable `RUST_LOG` and the `--log-level` CLI flag take precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}
