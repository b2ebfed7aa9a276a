//! Shared integration test helpers for teamdeck.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::{sample_directory, shell};
//! ```
//!
//! The `#![allow(dead_code)]` suppresses warnings when only a subset of
//! helpers is used per file.

#![allow(dead_code)]

use std::path::PathBuf;
use teamdeck::config::Config;
use teamdeck::scope::{OrgDirectory, ScopeContext, UnrestrictedOnly};
use teamdeck::shell::{RecordingNavigator, ShellController};
use teamdeck::tab::{PaneId, TabDescriptor, TabId, TabManager};
use tempfile::TempDir;

pub const DIRECTORY_YAML: &str = "\
organizations:
  - id: acme
    name: Acme Corp
    divisions:
      - id: eng
        name: Engineering
        projects:
          - id: apollo
            name: Apollo
          - id: zeus
            name: Zeus
            restricted: true
      - id: design
        name: Design
  - id: globex
    name: Globex
    divisions:
      - id: sales
        name: Sales
";

pub fn sample_directory() -> OrgDirectory {
    serde_yaml_ng::from_str(DIRECTORY_YAML).expect("sample directory parses")
}

/// Controller scoped to acme/eng with an empty tab store
pub fn shell() -> ShellController<RecordingNavigator> {
    shell_with_tabs(TabManager::new())
}

/// Controller scoped to acme/eng over an existing tab store
pub fn shell_with_tabs(tabs: TabManager) -> ShellController<RecordingNavigator> {
    let scope = ScopeContext::resolve(sample_directory(), UnrestrictedOnly, None)
        .expect("sample directory resolves");
    ShellController::new(tabs, scope, RecordingNavigator::new())
}

/// Scoped href under acme/eng
pub fn href(relative: &str) -> String {
    format!("/acme/eng{relative}")
}

/// Open each path in the primary pane, returning the ids in order
pub fn open_all(mgr: &mut TabManager, paths: &[&str]) -> Vec<TabId> {
    paths
        .iter()
        .map(|p| mgr.open_tab(TabDescriptor::for_path(p)))
        .collect()
}

/// Number of tabs flagged active in a pane
pub fn active_count(mgr: &TabManager, pane: PaneId) -> usize {
    mgr.tabs_in_pane(pane).filter(|t| t.is_active).count()
}

/// Exactly one active tab in every non-empty pane, none in an empty one
pub fn assert_pane_invariants(mgr: &TabManager) {
    for pane in PaneId::all() {
        let expected = usize::from(!mgr.pane_is_empty(pane));
        assert_eq!(
            active_count(mgr, pane),
            expected,
            "active flags in {pane} pane: {:?}",
            mgr.tabs()
        );
        assert_eq!(mgr.active_tab_id(pane).is_some(), expected == 1);
    }
    let mut ids: Vec<&str> = mgr.tabs().iter().map(|t| t.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), mgr.tab_count(), "tab ids are unique");
}

/// Temp dir holding a config file whose session lives next to it
pub fn config_in_tmp_dir(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.yaml");
    config.save_to(&path).expect("Failed to write config");
    (path, temp_dir)
}
