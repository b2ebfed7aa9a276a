//! Capture current session state from a live shell

use super::{SessionActive, SessionSplit, SessionState, SessionTab};
use crate::scope::ScopeContext;
use crate::tab::{PaneId, Tab, TabManager};

/// Capture the tab store and scope into a serializable snapshot
pub fn capture_session(tabs: &TabManager, scope: &ScopeContext) -> SessionState {
    let session_tabs: Vec<SessionTab> = tabs.tabs().iter().map(capture_tab).collect();

    SessionState {
        saved_at: chrono::Utc::now().to_rfc3339(),
        scope: Some(scope.scope().clone()),
        focused_pane: tabs.focused_pane(),
        active: SessionActive {
            primary: tabs.active_tab_id(PaneId::Primary).cloned(),
            secondary: tabs.active_tab_id(PaneId::Secondary).cloned(),
        },
        tabs: session_tabs,
    }
}

pub fn capture_tab(tab: &Tab) -> SessionTab {
    SessionTab {
        id: tab.id.clone(),
        title: tab.title.clone(),
        kind: tab.kind,
        path: tab.path.clone(),
        pane: tab.pane,
        pinned: tab.is_pinned,
        dirty: tab.is_dirty,
        opened: tab.opened_seq,
        split: tab.split.as_ref().map(|s| SessionSplit {
            direction: s.direction,
            mirror: s.mirror.clone(),
        }),
        mirror_of: tab.mirror_of.clone(),
    }
}
