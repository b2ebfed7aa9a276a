//! Shell controller: the single place where navigation, tabs and scope meet
//!
//! Data flows one way. A navigation event or user action is classified,
//! applied to the `TabManager` / `ScopeContext`, and only then turned into a
//! `Navigator::push`. The router echoes the push back through
//! `handle_path_change`; the last-applied-path guard makes that echo a no-op.

mod layout;
mod navigator;

pub use layout::{PaneView, ShellLayout, TabView};
pub use navigator::{Navigator, RecordingNavigator};

use crate::route::{DEFAULT_PATH, classify, normalize_path};
use crate::scope::{ScopeContext, ScopeError};
use crate::tab::{PaneId, SplitDirection, TabDescriptor, TabId, TabManager, TabPatch};
use serde::{Deserialize, Serialize};

/// User-driven tab actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShellAction {
    Activate { id: TabId },
    Close { id: TabId },
    CloseAll,
    Duplicate { id: TabId },
    TogglePin { id: TabId },
    ToggleSplit {
        id: TabId,
        #[serde(default)]
        direction: Option<SplitDirection>,
    },
    NextTab,
    PrevTab,
    SwitchToIndex { index: usize },
    Move { id: TabId, index: usize },
    ClosePane { pane: PaneId },
    FocusPane { pane: PaneId },
}

/// Owns the tab store and scope context of one shell session
pub struct ShellController<N: Navigator> {
    tabs: TabManager,
    scope: ScopeContext,
    navigator: N,
    /// Relative path the store currently reflects
    last_applied: Option<String>,
    default_path: String,
}

impl<N: Navigator> ShellController<N> {
    pub fn new(tabs: TabManager, scope: ScopeContext, navigator: N) -> Self {
        Self {
            tabs,
            scope,
            navigator,
            last_applied: None,
            default_path: DEFAULT_PATH.to_string(),
        }
    }

    /// Path pushed when the last tab goes away, and the division
    /// breadcrumb's target
    pub fn with_default_path(mut self, path: &str) -> Self {
        self.default_path = normalize_path(path);
        self.scope.set_home_path(&self.default_path);
        self
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn scope(&self) -> &ScopeContext {
        &self.scope
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }

    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }

    /// Give up the parts, e.g. to capture a session
    pub fn into_parts(self) -> (TabManager, ScopeContext, N) {
        (self.tabs, self.scope, self.navigator)
    }

    /// React to the browser location changing.
    ///
    /// Returns the tab that now shows the path, or `None` when the event was
    /// ignored (outside the current scope, or already applied).
    pub fn handle_path_change(&mut self, href: &str) -> Option<TabId> {
        let Some(relative) = self.scope.strip_prefix(href) else {
            log::debug!("Ignoring path {} outside the current scope", href);
            return None;
        };
        let path = normalize_path(&relative);
        if self.last_applied.as_deref() == Some(path.as_str()) {
            return None;
        }

        let classification = classify(&path);
        let pane = self.tabs.focused_pane();
        let existing = self
            .tabs
            .find_in_pane_by_path(pane, &path)
            .map(|t| (t.id.clone(), t.title != classification.title || t.kind != classification.kind));

        let id = match existing {
            Some((id, stale)) => {
                if stale {
                    self.tabs.update_tab(
                        id.as_str(),
                        TabPatch::classified(classification.title, classification.kind),
                    );
                }
                self.tabs.set_active_tab_id(id.as_str());
                id
            }
            None => self
                .tabs
                .open_tab(TabDescriptor::for_path(&path).in_pane(pane)),
        };

        debug_log!("NAV", "Applied path {} to tab {}", path, id);
        self.last_applied = Some(path);
        Some(id)
    }

    /// Apply a tab action, then navigate to whatever is active afterwards.
    ///
    /// Returns false when the action targeted an unknown tab or changed nothing.
    pub fn dispatch(&mut self, action: ShellAction) -> bool {
        log::debug!("Dispatching {:?}", action);
        let changed = match &action {
            ShellAction::Activate { id } => self.tabs.set_active_tab_id(id.as_str()),
            ShellAction::Close { id } => self.tabs.close_tab(id.as_str()).is_some(),
            ShellAction::CloseAll => !self.tabs.close_all_tabs().is_empty(),
            ShellAction::Duplicate { id } => self.tabs.duplicate_tab(id.as_str()).is_some(),
            ShellAction::TogglePin { id } => self.tabs.toggle_tab_pinned(id.as_str()).is_some(),
            ShellAction::ToggleSplit { id, direction } => self
                .tabs
                .toggle_split_view(id.as_str(), *direction)
                .is_some(),
            ShellAction::NextTab => {
                self.tabs.next_tab();
                true
            }
            ShellAction::PrevTab => {
                self.tabs.prev_tab();
                true
            }
            ShellAction::SwitchToIndex { index } => self.tabs.switch_to_index(*index),
            ShellAction::Move { id, index } => self.tabs.move_tab_to_index(id.as_str(), *index),
            ShellAction::ClosePane { pane } => !self.tabs.close_pane(*pane).is_empty(),
            ShellAction::FocusPane { pane } => self.tabs.focus_pane(*pane),
        };
        if changed {
            self.sync_navigation();
        }
        changed
    }

    /// Switch organization and division, then show the current tab under
    /// the new prefix
    pub fn switch_scope(&mut self, org_id: &str, division_id: &str) -> Result<(), ScopeError> {
        self.scope
            .set_scope(org_id, division_id)
            .inspect_err(|e| log::warn!("Scope change rejected: {}", e))?;
        self.push_current();
        Ok(())
    }

    pub fn switch_division(&mut self, division_id: &str) -> Result<(), ScopeError> {
        self.scope
            .set_division(division_id)
            .inspect_err(|e| log::warn!("Division change rejected: {}", e))?;
        self.push_current();
        Ok(())
    }

    /// Enter a project scope and navigate to the project's page
    pub fn enter_project(&mut self, project_id: &str) -> Result<(), ScopeError> {
        self.scope
            .set_project_scope(project_id)
            .inspect_err(|e| log::warn!("Project change rejected: {}", e))?;
        let href = self.scope.href(&format!("/projects/{}", project_id));
        self.navigator.push(&href);
        Ok(())
    }

    /// Leave the project scope and navigate back to the workspace view.
    /// Returns false if no project was set.
    pub fn leave_project(&mut self) -> bool {
        if !self.scope.clear_project_scope() {
            return false;
        }
        let href = self.scope.href(&self.default_path);
        self.navigator.push(&href);
        true
    }

    /// Render-ready snapshot of the current state
    pub fn layout(&self) -> ShellLayout {
        let panes = PaneId::all()
            .into_iter()
            .filter(|pane| !self.tabs.pane_is_empty(*pane))
            .map(|pane| PaneView {
                pane,
                is_focused: pane == self.tabs.focused_pane(),
                active: self.tabs.active_tab_id(pane).cloned(),
                tabs: self
                    .tabs
                    .tabs_in_pane(pane)
                    .map(|tab| TabView::new(tab, self.scope.href(&tab.path)))
                    .collect(),
            })
            .collect();
        // Orientation of the mirror on screen, or the configured default for
        // a secondary pane opened by navigation
        let split = self.tabs.is_split_layout().then(|| {
            self.tabs
                .active_tab_in(PaneId::Secondary)
                .and_then(|mirror| mirror.mirror_of.as_ref())
                .and_then(|source| self.tabs.get_tab(source.as_str()))
                .and_then(|source| source.split_direction())
                .unwrap_or(self.tabs.default_split_direction())
        });

        ShellLayout {
            breadcrumbs: self.scope.breadcrumbs().to_vec(),
            split,
            panes,
        }
    }

    /// Push the active tab's path, or the default path once nothing is open
    fn sync_navigation(&mut self) {
        match self.tabs.active_tab().map(|t| t.path.clone()) {
            Some(path) => {
                if self.last_applied.as_deref() == Some(path.as_str()) {
                    return;
                }
                let href = self.scope.href(&path);
                debug_log!("NAV", "Pushing {}", href);
                self.navigator.push(&href);
                self.last_applied = Some(path);
            }
            None => {
                // Cleared so the echoed default path opens a fresh tab
                if self.last_applied.take().is_some() {
                    let href = self.scope.href(&self.default_path);
                    self.navigator.push(&href);
                }
            }
        }
    }

    fn push_current(&mut self) {
        let path = self
            .tabs
            .active_tab()
            .map(|t| t.path.clone())
            .unwrap_or_else(|| self.default_path.clone());
        let href = self.scope.href(&path);
        self.navigator.push(&href);
        self.last_applied = self.tabs.active_tab().map(|t| t.path.clone());
    }
}
