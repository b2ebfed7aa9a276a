//! Tab management for the workspace shell
//!
//! This module provides the core tab infrastructure including:
//! - `Tab`: one open view bound to a navigation path, living in a pane
//! - `TabManager`: the registry of open tabs and the per-pane active pointer
//! - `TabId`: path-derived unique identifier for each tab
//! - `TabDescriptor` / `TabPatch`: validated input for opening and updating tabs

mod id;
mod manager;

pub use id::{base_id, disambiguate};
pub use manager::{SplitToggle, TabManager};
pub use teamdeck_config::{PaneId, SplitDirection};

use crate::route::{classify, normalize_path};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique tab key, derived from the tab's path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl PartialEq<str> for TabId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TabId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What kind of view a tab shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabKind {
    Task,
    Project,
    Doc,
    Channel,
    Calendar,
    Timeline,
}

impl TabKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TabKind::Task => "task",
            TabKind::Project => "project",
            TabKind::Doc => "doc",
            TabKind::Channel => "channel",
            TabKind::Calendar => "calendar",
            TabKind::Timeline => "timeline",
        }
    }
}

impl fmt::Display for TabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Split-view state carried by the tab whose content is mirrored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitState {
    /// Edge the secondary pane is placed against
    pub direction: SplitDirection,
    /// The mirrored tab in the secondary pane
    pub mirror: TabId,
}

/// A single open view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub id: TabId,
    pub title: String,
    pub kind: TabKind,
    /// Normalized path relative to the active organization/division
    pub path: String,
    pub pane: PaneId,
    /// Maintained by `TabManager`: true for the active tab of each pane
    pub is_active: bool,
    /// Pinned tabs survive `close_all_tabs`
    pub is_pinned: bool,
    /// Reserved for unsaved-state indication
    pub is_dirty: bool,
    /// Set on a tab whose content is mirrored into the secondary pane
    pub split: Option<SplitState>,
    /// Set on a mirror, pointing back at the tab it mirrors
    pub mirror_of: Option<TabId>,
    /// Insertion order, used to pick the next active tab on close
    pub(crate) opened_seq: u64,
}

impl Tab {
    pub fn is_split(&self) -> bool {
        self.split.is_some()
    }

    pub fn split_direction(&self) -> Option<SplitDirection> {
        self.split.as_ref().map(|s| s.direction)
    }

    pub fn is_mirror(&self) -> bool {
        self.mirror_of.is_some()
    }
}

/// Reasons a descriptor is refused at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("tab path {0:?} is not normalized")]
    UnnormalizedPath(String),
    #[error("tab title must not be empty")]
    EmptyTitle,
}

/// Input for `TabManager::open_tab`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabDescriptor {
    /// Explicit id; when `None` one is derived from the path
    pub id: Option<TabId>,
    path: String,
    title: String,
    kind: TabKind,
    pane: PaneId,
    pinned: bool,
}

impl TabDescriptor {
    /// Build a descriptor from explicit fields.
    ///
    /// The path must already be normalized and the title non-empty.
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        kind: TabKind,
    ) -> Result<Self, DescriptorError> {
        let path = path.into();
        let title = title.into();
        if normalize_path(&path) != path {
            return Err(DescriptorError::UnnormalizedPath(path));
        }
        if title.trim().is_empty() {
            return Err(DescriptorError::EmptyTitle);
        }
        Ok(Self {
            id: None,
            path,
            title,
            kind,
            pane: PaneId::Primary,
            pinned: false,
        })
    }

    /// Normalize and classify an arbitrary path. Never fails.
    pub fn for_path(raw: &str) -> Self {
        let path = normalize_path(raw);
        let classification = classify(&path);
        Self {
            id: None,
            path,
            title: classification.title,
            kind: classification.kind,
            pane: PaneId::Primary,
            pinned: false,
        }
    }

    pub fn with_id(mut self, id: TabId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn in_pane(mut self, pane: PaneId) -> Self {
        self.pane = pane;
        self
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> TabKind {
        self.kind
    }

    pub fn pane(&self) -> PaneId {
        self.pane
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// Partial update merged by `TabManager::update_tab`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabPatch {
    pub title: Option<String>,
    pub kind: Option<TabKind>,
    /// Normalized on apply
    pub path: Option<String>,
    pub is_dirty: Option<bool>,
}

impl TabPatch {
    /// Patch carrying a fresh classification for a path
    pub fn classified(title: impl Into<String>, kind: TabKind) -> Self {
        Self {
            title: Some(title.into()),
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.kind.is_none() && self.path.is_none() && self.is_dirty.is_none()
    }
}
