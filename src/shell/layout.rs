//! Render-ready snapshot of the shell: breadcrumbs plus the tabs of each pane

use crate::scope::Breadcrumb;
use crate::tab::{PaneId, SplitDirection, Tab, TabId, TabKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabView {
    pub id: TabId,
    pub title: String,
    pub kind: TabKind,
    pub path: String,
    /// Scoped browser path the tab navigates to
    pub href: String,
    pub is_active: bool,
    pub is_pinned: bool,
    pub is_dirty: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_of: Option<TabId>,
}

impl TabView {
    pub(crate) fn new(tab: &Tab, href: String) -> Self {
        Self {
            id: tab.id.clone(),
            title: tab.title.clone(),
            kind: tab.kind,
            path: tab.path.clone(),
            href,
            is_active: tab.is_active,
            is_pinned: tab.is_pinned,
            is_dirty: tab.is_dirty,
            split: tab.split_direction(),
            mirror_of: tab.mirror_of.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneView {
    pub pane: PaneId,
    pub is_focused: bool,
    pub active: Option<TabId>,
    pub tabs: Vec<TabView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellLayout {
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Orientation of the secondary pane, taken from the split source
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitDirection>,
    /// Only panes with tabs are listed; primary first
    pub panes: Vec<PaneView>,
}

impl ShellLayout {
    pub fn pane(&self, pane: PaneId) -> Option<&PaneView> {
        self.panes.iter().find(|p| p.pane == pane)
    }
}

impl fmt::Display for ShellLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trail: Vec<&str> = self.breadcrumbs.iter().map(|b| b.name.as_str()).collect();
        writeln!(f, "{}", trail.join(" > "))?;

        if self.panes.is_empty() {
            return writeln!(f, "  (no tabs)");
        }
        for pane in &self.panes {
            write!(f, "[{}]", pane.pane)?;
            if pane.is_focused {
                write!(f, " focused")?;
            }
            if pane.pane == PaneId::Secondary
                && let Some(direction) = self.split
            {
                write!(f, " split {}", direction.display_name().to_lowercase())?;
            }
            writeln!(f)?;

            for tab in &pane.tabs {
                let marker = if tab.is_active { '*' } else { ' ' };
                write!(f, "  {} {:<24} {:<20} {:<8} {}", marker, tab.id, tab.title, tab.kind, tab.href)?;
                if tab.is_pinned {
                    write!(f, " pinned")?;
                }
                if tab.is_dirty {
                    write!(f, " dirty")?;
                }
                if let Some(source) = &tab.mirror_of {
                    write!(f, " mirrors {}", source)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
