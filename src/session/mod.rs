//! Session state types for save/restore across launches
//!
//! On clean exit the open tabs, per-pane active tabs, focused pane and scope
//! are written to a YAML blob; the next launch restores them, re-checking
//! every invariant against the current org directory.

pub mod capture;
pub mod restore;
pub mod storage;

use crate::scope::Scope;
use crate::tab::{PaneId, SplitDirection, TabId, TabKind};
use serde::{Deserialize, Serialize};

/// Top-level session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Timestamp when the session was saved (RFC 3339)
    pub saved_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub focused_pane: PaneId,
    #[serde(default)]
    pub active: SessionActive,
    /// Tabs in tab-bar order
    #[serde(default)]
    pub tabs: Vec<SessionTab>,
}

/// Active tab id of each pane
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionActive {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<TabId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<TabId>,
}

impl SessionActive {
    pub fn get(&self, pane: PaneId) -> Option<&TabId> {
        match pane {
            PaneId::Primary => self.primary.as_ref(),
            PaneId::Secondary => self.secondary.as_ref(),
        }
    }
}

/// A single tab in a saved session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTab {
    pub id: TabId,
    pub title: String,
    pub kind: TabKind,
    pub path: String,
    #[serde(default)]
    pub pane: PaneId,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pinned: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dirty: bool,
    /// Open order among the saved tabs; 0 when unknown
    #[serde(default)]
    pub opened: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SessionSplit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mirror_of: Option<TabId>,
}

/// Split link of a mirrored tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSplit {
    pub direction: SplitDirection,
    pub mirror: TabId,
}
