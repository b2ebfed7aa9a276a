//! Configuration system for the teamdeck workspace shell.
//!
//! This crate provides configuration loading, saving, and default values
//! for the shell. It includes:
//!
//! - The `Config` struct and its YAML persistence
//! - Shared layout types (`PaneId`, `SplitDirection`) used by the tab store
//! - Log level selection for the debug log bridge

pub mod config;
pub mod defaults;
pub mod error;
mod types;

pub use config::Config;
pub use error::ConfigError;
pub use types::{LogLevel, PaneId, SplitDirection};
