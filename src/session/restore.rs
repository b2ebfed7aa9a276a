//! Helpers for restoring session state

use super::{SessionState, SessionTab};
use crate::route::{classify, normalize_path};
use crate::scope::{OrgDirectory, ProjectAccess, ScopeContext, ScopeError};
use crate::tab::{PaneId, SplitDirection, SplitState, Tab, TabManager};

/// Rebuild the tab store from a saved session.
///
/// Split links are kept only when both ends agree and the source lives in the
/// primary pane; tabs with an empty title are re-classified from their path.
pub fn restore_tabs(state: &SessionState, default_split_direction: SplitDirection) -> TabManager {
    let tabs: Vec<Tab> = state
        .tabs
        .iter()
        .map(|saved| restore_tab(saved, state))
        .collect();
    let active = PaneId::all()
        .into_iter()
        .filter_map(|pane| state.active.get(pane).map(|id| (pane, id.clone())));

    TabManager::restore(tabs, active, state.focused_pane, default_split_direction)
}

/// Resolve the saved scope against the current directory, falling back to
/// the first organization when it no longer exists
pub fn restore_scope(
    state: &SessionState,
    directory: OrgDirectory,
    access: impl ProjectAccess + 'static,
) -> Result<ScopeContext, ScopeError> {
    let ctx = ScopeContext::resolve(directory, access, state.scope.as_ref())?;
    if state.scope.as_ref().is_some_and(|saved| saved != ctx.scope()) {
        log::warn!(
            "Session restore: saved scope {:?} is no longer valid, using {:?}",
            state.scope,
            ctx.scope()
        );
    }
    Ok(ctx)
}

fn restore_tab(saved: &SessionTab, state: &SessionState) -> Tab {
    let path = normalize_path(&saved.path);
    let (title, kind) = if saved.title.trim().is_empty() {
        let classification = classify(&path);
        (classification.title, classification.kind)
    } else {
        (saved.title.clone(), saved.kind)
    };

    let split = saved
        .split
        .as_ref()
        .filter(|split| {
            saved.pane == PaneId::Primary
                && state.tabs.iter().any(|t| {
                    t.id == split.mirror
                        && t.pane == PaneId::Secondary
                        && t.mirror_of.as_ref() == Some(&saved.id)
                })
        })
        .map(|split| SplitState {
            direction: split.direction,
            mirror: split.mirror.clone(),
        });
    let mirror_of = saved.mirror_of.clone().filter(|source| {
        saved.pane == PaneId::Secondary
            && state.tabs.iter().any(|t| {
                &t.id == source
                    && t.pane == PaneId::Primary
                    && t.split.as_ref().is_some_and(|s| s.mirror == saved.id)
            })
    });
    if saved.split.is_some() != split.is_some() || saved.mirror_of.is_some() != mirror_of.is_some() {
        log::warn!("Session restore: dropped inconsistent split link on tab {}", saved.id);
    }

    Tab {
        id: saved.id.clone(),
        title,
        kind,
        path,
        pane: saved.pane,
        is_active: false,
        is_pinned: saved.pinned,
        is_dirty: saved.dirty,
        split,
        mirror_of,
        opened_seq: saved.opened,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::capture::capture_session;
    use crate::scope::{AllowAll, Scope};
    use crate::tab::{TabDescriptor, TabId, TabKind};

    fn directory() -> OrgDirectory {
        serde_yaml_ng::from_str(
            "\
organizations:
  - id: acme
    name: Acme
    divisions:
      - id: eng
        name: Engineering
        projects:
          - id: apollo
            name: Apollo
",
        )
        .unwrap()
    }

    fn live_state() -> SessionState {
        let mut tabs = TabManager::new();
        tabs.open_tab(TabDescriptor::for_path("/dashboard").pinned(true));
        tabs.open_tab(TabDescriptor::for_path("/calendar"));
        tabs.toggle_split_view("calendar", Some(SplitDirection::Down));
        tabs.set_active_tab_id("dashboard");
        let scope = ScopeContext::resolve(directory(), AllowAll, None).unwrap();
        capture_session(&tabs, &scope)
    }

    #[test]
    fn test_restore_reproduces_store() {
        let state = live_state();
        let tabs = restore_tabs(&state, SplitDirection::Right);

        assert_eq!(tabs.tab_count(), 3);
        assert_eq!(tabs.active_tab().map(|t| t.id.as_str()), Some("dashboard"));
        assert!(tabs.get_tab("dashboard").unwrap().is_pinned);
        assert_eq!(
            tabs.get_tab("calendar").unwrap().split_direction(),
            Some(SplitDirection::Down)
        );
        assert_eq!(
            tabs.active_tab_id(PaneId::Secondary),
            Some(&TabId::new("calendar-1"))
        );
    }

    #[test]
    fn test_restore_drops_one_sided_split() {
        let mut state = live_state();
        state.tabs.retain(|t| t.id != "calendar-1");
        state.active.secondary = None;

        let tabs = restore_tabs(&state, SplitDirection::Right);
        assert!(!tabs.get_tab("calendar").unwrap().is_split());
        assert!(!tabs.is_split_layout());
    }

    #[test]
    fn test_restore_rejects_secondary_split_source() {
        let mut state = live_state();
        for tab in &mut state.tabs {
            tab.pane = PaneId::Secondary;
        }
        let tabs = restore_tabs(&state, SplitDirection::Right);
        assert!(tabs.tabs().iter().all(|t| !t.is_split() && !t.is_mirror()));
        assert_eq!(tabs.focused_pane(), PaneId::Secondary);
    }

    #[test]
    fn test_restore_reclassifies_blank_title() {
        let mut state = live_state();
        state.tabs[1].title = String::new();
        state.tabs[1].kind = TabKind::Doc;
        let tabs = restore_tabs(&state, SplitDirection::Right);
        let calendar = tabs.get_tab("calendar").unwrap();
        assert_eq!(calendar.title, "Calendar");
        assert_eq!(calendar.kind, TabKind::Calendar);
    }

    #[test]
    fn test_restore_scope_falls_back() {
        let mut state = live_state();
        state.scope = Some(Scope::new("gone", "eng"));
        let ctx = restore_scope(&state, directory(), AllowAll).unwrap();
        assert_eq!(ctx.scope(), &Scope::new("acme", "eng"));
    }
}
