//! Configuration re-exports from the teamdeck-config crate.

pub use teamdeck_config::{Config, ConfigError, LogLevel, PaneId, SplitDirection, defaults};
