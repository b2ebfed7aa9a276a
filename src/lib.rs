// Library exports for the binary and integration tests
//
// The shell is single-threaded and synchronous: `TabManager`, `ScopeContext`
// and `ShellController` are plain owned values passed explicitly, never
// globals. The only shared state is the debug logger.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod app;
pub mod cli;
pub mod config;
pub mod route;
pub mod scope;
pub mod script;
pub mod session;
pub mod shell;
pub mod tab;
