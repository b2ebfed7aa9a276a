//! Tab manager: the registry of open tabs across the primary and secondary panes
//!
//! All operations are synchronous. Operations on an unknown id are no-ops and
//! report that through their return value (`None` / `false`), never by
//! panicking, since they are driven by UI events that can race navigation.
//!
//! After every mutation each non-empty pane has exactly one active tab and an
//! empty pane has none; the `is_active` flags on the tabs mirror the
//! per-pane pointer.

use super::id::{base_id, disambiguate};
use super::{PaneId, SplitDirection, SplitState, Tab, TabDescriptor, TabId, TabPatch};
use crate::route::normalize_path;
use std::collections::BTreeMap;

/// Outcome of `TabManager::toggle_split_view`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitToggle {
    /// The tab is now split; its content is mirrored by `mirror`
    Split { mirror: TabId },
    /// The split was removed together with its mirror
    Unsplit { mirror: TabId },
}

/// Manages the open tabs of one shell session
#[derive(Debug, Clone)]
pub struct TabManager {
    /// All tabs, in tab-bar order (per pane, order is the relative order here)
    tabs: Vec<Tab>,
    /// Active tab of each non-empty pane
    active: BTreeMap<PaneId, TabId>,
    /// Pane that receives navigation and whose active tab is "the" active tab
    focused_pane: PaneId,
    /// Counter for insertion order
    next_seq: u64,
    /// Direction used when `toggle_split_view` is called without one
    default_split_direction: SplitDirection,
}

impl TabManager {
    /// Create a new empty tab manager
    pub fn new() -> Self {
        Self::with_split_direction(SplitDirection::default())
    }

    /// Create an empty tab manager with a configured default split direction
    pub fn with_split_direction(direction: SplitDirection) -> Self {
        Self {
            tabs: Vec::new(),
            active: BTreeMap::new(),
            focused_pane: PaneId::Primary,
            next_seq: 1,
            default_split_direction: direction,
        }
    }

    /// Rebuild a manager from previously captured tabs.
    ///
    /// Duplicate ids are dropped (first one wins), split links that are not
    /// reciprocal are cleared, and the active pointers are re-derived where the
    /// supplied ones are unusable. Open order is kept from `opened_seq`; tabs
    /// without one (0) count as opened after all others, in tab-bar order.
    pub fn restore(
        tabs: Vec<Tab>,
        active: impl IntoIterator<Item = (PaneId, TabId)>,
        focused_pane: PaneId,
        default_split_direction: SplitDirection,
    ) -> Self {
        let mut manager = Self::with_split_direction(default_split_direction);
        manager.next_seq = tabs.iter().map(|t| t.opened_seq).max().unwrap_or(0) + 1;
        for mut tab in tabs {
            if manager.contains(tab.id.as_str()) {
                log::warn!("Dropping duplicate tab id {} during restore", tab.id);
                continue;
            }
            tab.path = normalize_path(&tab.path);
            if tab.opened_seq == 0 {
                tab.opened_seq = manager.bump_seq();
            }
            manager.tabs.push(tab);
        }
        manager.active = active.into_iter().collect();
        manager.focused_pane = focused_pane;
        manager.settle();
        log::info!("Restored {} tabs", manager.tabs.len());
        manager
    }

    /// Open a tab, or activate it if a tab with the descriptor's id exists.
    ///
    /// New tabs get an id disambiguated from their path unless the descriptor
    /// carries one. The tab's pane becomes the focused pane.
    pub fn open_tab(&mut self, descriptor: TabDescriptor) -> TabId {
        if let Some(id) = &descriptor.id
            && self.contains(id.as_str())
        {
            let id = id.clone();
            self.activate(&id);
            log::debug!("Tab {} already open, activated", id);
            return id;
        }

        let id = match descriptor.id.clone() {
            Some(id) => id,
            None => self.unique_id_for(descriptor.path()),
        };

        let tab = Tab {
            id: id.clone(),
            title: descriptor.title().to_string(),
            kind: descriptor.kind(),
            path: descriptor.path().to_string(),
            pane: descriptor.pane(),
            is_active: false,
            is_pinned: descriptor.is_pinned(),
            is_dirty: false,
            split: None,
            mirror_of: None,
            opened_seq: self.bump_seq(),
        };
        self.tabs.push(tab);
        self.activate(&id);

        log::info!(
            "Opened tab {} at {} in {} pane (total: {})",
            id,
            descriptor.path(),
            descriptor.pane(),
            self.tabs.len()
        );
        id
    }

    /// Activate a tab by id. Returns false (and changes nothing) for an unknown id.
    pub fn set_active_tab_id(&mut self, id: &str) -> bool {
        match self.find(id) {
            Some(tab) => {
                let id = tab.id.clone();
                self.activate(&id);
                log::debug!("Switched to tab {}", id);
                true
            }
            None => false,
        }
    }

    /// Close a tab by id, returning it.
    ///
    /// If it was active, the most recently opened remaining tab of the same
    /// pane takes over, or the pane's pointer is cleared. Closing a split tab
    /// also closes its mirror; closing a mirror un-splits its source.
    pub fn close_tab(&mut self, id: &str) -> Option<Tab> {
        let idx = self.position(id)?;
        let tab = self.tabs.remove(idx);
        log::info!("Closing tab {} (index {})", tab.id, idx);

        if let Some(split) = &tab.split
            && let Some(mirror_idx) = self.position(split.mirror.as_str())
        {
            let mirror = self.tabs.remove(mirror_idx);
            log::debug!("Closed mirror {} with its source {}", mirror.id, tab.id);
        }

        self.settle();
        Some(tab)
    }

    /// Close every tab that is not pinned, returning the removed tabs
    pub fn close_all_tabs(&mut self) -> Vec<Tab> {
        let (kept, removed): (Vec<Tab>, Vec<Tab>) =
            std::mem::take(&mut self.tabs).into_iter().partition(|t| t.is_pinned);
        self.tabs = kept;
        self.settle();
        log::info!(
            "Closed {} tabs, {} pinned tabs remain",
            removed.len(),
            self.tabs.len()
        );
        removed
    }

    /// Close every tab in a pane, along with the mirrors of those tabs
    pub fn close_pane(&mut self, pane: PaneId) -> Vec<Tab> {
        let mirrors: Vec<TabId> = self
            .tabs
            .iter()
            .filter(|t| t.pane == pane)
            .filter_map(|t| t.split.as_ref().map(|s| s.mirror.clone()))
            .collect();
        let (removed, kept): (Vec<Tab>, Vec<Tab>) = std::mem::take(&mut self.tabs)
            .into_iter()
            .partition(|t| t.pane == pane || mirrors.contains(&t.id));
        self.tabs = kept;
        self.settle();
        log::info!("Closed {} pane ({} tabs)", pane, removed.len());
        removed
    }

    /// Duplicate a tab into the same pane, right after the original.
    ///
    /// The copy gets a fresh id, becomes active, and is neither pinned nor split.
    pub fn duplicate_tab(&mut self, id: &str) -> Option<TabId> {
        let source_idx = self.position(id)?;
        let seq = self.bump_seq();
        let source = &self.tabs[source_idx];
        let new_id = self.unique_id_for(&source.path);

        let copy = Tab {
            id: new_id.clone(),
            title: source.title.clone(),
            kind: source.kind,
            path: source.path.clone(),
            pane: source.pane,
            is_active: false,
            is_pinned: false,
            is_dirty: false,
            split: None,
            mirror_of: None,
            opened_seq: seq,
        };
        self.tabs.insert(source_idx + 1, copy);
        self.activate(&new_id);

        log::info!("Duplicated tab {} as {}", id, new_id);
        Some(new_id)
    }

    /// Flip a tab's pinned flag, returning the new value
    pub fn toggle_tab_pinned(&mut self, id: &str) -> Option<bool> {
        let tab = self.find_mut(id)?;
        tab.is_pinned = !tab.is_pinned;
        log::debug!("Tab {} pinned={}", tab.id, tab.is_pinned);
        Some(tab.is_pinned)
    }

    /// Merge a partial update into a tab.
    ///
    /// Title, kind and path changes are carried over to the tab's mirror.
    pub fn update_tab(&mut self, id: &str, patch: TabPatch) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let path = patch.path.as_deref().map(normalize_path);

        let tab = &mut self.tabs[idx];
        if let Some(title) = &patch.title {
            tab.title = title.clone();
        }
        if let Some(kind) = patch.kind {
            tab.kind = kind;
        }
        if let Some(path) = &path {
            tab.path = path.clone();
        }
        if let Some(dirty) = patch.is_dirty {
            tab.is_dirty = dirty;
        }

        if let Some(mirror_id) = tab.split.as_ref().map(|s| s.mirror.clone())
            && let Some(mirror) = self.find_mut(mirror_id.as_str())
        {
            if let Some(title) = patch.title {
                mirror.title = title;
            }
            if let Some(kind) = patch.kind {
                mirror.kind = kind;
            }
            if let Some(path) = path {
                mirror.path = path;
            }
        }
        true
    }

    /// Split a tab into the secondary pane, or remove an existing split.
    ///
    /// Returns `None` for an unknown id and for tabs already in the secondary
    /// pane, which cannot be split further.
    pub fn toggle_split_view(
        &mut self,
        id: &str,
        direction: Option<SplitDirection>,
    ) -> Option<SplitToggle> {
        let idx = self.position(id)?;
        if self.tabs[idx].pane == PaneId::Secondary {
            log::debug!("Tab {} is in the secondary pane, not splitting", id);
            return None;
        }

        if let Some(split) = self.tabs[idx].split.take() {
            if let Some(mirror_idx) = self.position(split.mirror.as_str()) {
                self.tabs.remove(mirror_idx);
            }
            self.settle();
            log::info!("Removed split view of tab {}", id);
            return Some(SplitToggle::Unsplit {
                mirror: split.mirror,
            });
        }

        let direction = direction.unwrap_or(self.default_split_direction);
        let mirror_id = self.unique_id_for(&self.tabs[idx].path);
        let seq = self.bump_seq();
        let source = &self.tabs[idx];
        let mirror = Tab {
            id: mirror_id.clone(),
            title: source.title.clone(),
            kind: source.kind,
            path: source.path.clone(),
            pane: PaneId::Secondary,
            is_active: false,
            is_pinned: false,
            is_dirty: false,
            split: None,
            mirror_of: Some(source.id.clone()),
            opened_seq: seq,
        };
        self.tabs[idx].split = Some(SplitState {
            direction,
            mirror: mirror_id.clone(),
        });
        self.tabs.push(mirror);
        self.active.insert(PaneId::Secondary, mirror_id.clone());
        self.settle();

        log::info!(
            "Split tab {} {} into mirror {}",
            id,
            direction.display_name(),
            mirror_id
        );
        Some(SplitToggle::Split { mirror: mirror_id })
    }

    /// Focus a pane. Returns false if the pane has no tabs.
    pub fn focus_pane(&mut self, pane: PaneId) -> bool {
        if self.pane_is_empty(pane) {
            return false;
        }
        self.focused_pane = pane;
        true
    }

    /// Activate the next tab of the focused pane (wraps around)
    pub fn next_tab(&mut self) {
        self.cycle(1);
    }

    /// Activate the previous tab of the focused pane (wraps around)
    pub fn prev_tab(&mut self) {
        self.cycle(-1);
    }

    /// Activate the n-th tab (1-based) of the focused pane
    pub fn switch_to_index(&mut self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        let id = self
            .tabs_in_pane(self.focused_pane)
            .nth(index - 1)
            .map(|t| t.id.clone());
        match id {
            Some(id) => {
                self.activate(&id);
                true
            }
            None => false,
        }
    }

    /// Move a tab to a position among the tabs of its pane (drag-and-drop).
    ///
    /// The index is clamped. Returns true if the tab actually moved.
    pub fn move_tab_to_index(&mut self, id: &str, target_index: usize) -> bool {
        let Some(pane) = self.find(id).map(|t| t.pane) else {
            return false;
        };
        let slots: Vec<usize> = self
            .tabs
            .iter()
            .enumerate()
            .filter(|(_, t)| t.pane == pane)
            .map(|(i, _)| i)
            .collect();
        let Some(current) = slots.iter().position(|&i| self.tabs[i].id == id) else {
            return false;
        };
        let target = target_index.min(slots.len().saturating_sub(1));
        if target == current {
            return false;
        }

        if current < target {
            for k in current..target {
                self.tabs.swap(slots[k], slots[k + 1]);
            }
        } else {
            for k in (target..current).rev() {
                self.tabs.swap(slots[k + 1], slots[k]);
            }
        }
        log::debug!("Moved tab {} from {} to {} in {} pane", id, current, target, pane);
        true
    }

    /// Get a tab by id
    pub fn get_tab(&self, id: &str) -> Option<&Tab> {
        self.find(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Find the tab showing `path` in `pane`
    pub fn find_in_pane_by_path(&self, pane: PaneId, path: &str) -> Option<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.pane == pane && t.path == path)
    }

    /// Active tab of the focused pane
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_in(self.focused_pane)
    }

    /// Active tab of a given pane
    pub fn active_tab_in(&self, pane: PaneId) -> Option<&Tab> {
        self.active
            .get(&pane)
            .and_then(|id| self.find(id.as_str()))
    }

    /// Active tab id of a given pane
    pub fn active_tab_id(&self, pane: PaneId) -> Option<&TabId> {
        self.active.get(&pane)
    }

    pub fn focused_pane(&self) -> PaneId {
        self.focused_pane
    }

    pub fn default_split_direction(&self) -> SplitDirection {
        self.default_split_direction
    }

    /// All tabs as a slice
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Tabs of one pane in tab-bar order
    pub fn tabs_in_pane(&self, pane: PaneId) -> impl Iterator<Item = &Tab> {
        self.tabs.iter().filter(move |t| t.pane == pane)
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn pane_is_empty(&self, pane: PaneId) -> bool {
        !self.tabs.iter().any(|t| t.pane == pane)
    }

    /// True while the secondary pane hosts any tab
    pub fn is_split_layout(&self) -> bool {
        !self.pane_is_empty(PaneId::Secondary)
    }

    /// Next free id for a tab showing `path`
    pub fn unique_id_for(&self, path: &str) -> TabId {
        disambiguate(&base_id(path), |candidate| self.contains(candidate))
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == id)
    }

    fn find(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == id)
    }

    /// Make `id` the active tab of its pane and focus that pane
    fn activate(&mut self, id: &TabId) {
        let Some(pane) = self.find(id.as_str()).map(|t| t.pane) else {
            return;
        };
        self.active.insert(pane, id.clone());
        self.focused_pane = pane;
        self.sync_active_flags();
    }

    fn cycle(&mut self, step: isize) {
        let ids: Vec<TabId> = self
            .tabs_in_pane(self.focused_pane)
            .map(|t| t.id.clone())
            .collect();
        if ids.len() <= 1 {
            return;
        }
        let current = self
            .active
            .get(&self.focused_pane)
            .and_then(|active| ids.iter().position(|id| id == active))
            .unwrap_or(0);
        let len = ids.len() as isize;
        let next = (current as isize + step).rem_euclid(len) as usize;
        let id = ids[next].clone();
        self.activate(&id);
    }

    /// Restore every invariant after tabs were removed or replaced:
    /// dangling split links, per-pane active pointers, focus, flags.
    fn settle(&mut self) {
        self.drop_dangling_links();

        for pane in PaneId::all() {
            let valid = self
                .active
                .get(&pane)
                .is_some_and(|id| self.tabs.iter().any(|t| t.pane == pane && t.id == *id));
            if valid {
                continue;
            }
            let fallback = self
                .tabs_in_pane(pane)
                .max_by_key(|t| t.opened_seq)
                .map(|t| t.id.clone());
            match fallback {
                Some(id) => {
                    self.active.insert(pane, id);
                }
                None => {
                    self.active.remove(&pane);
                }
            }
        }

        if self.pane_is_empty(self.focused_pane) {
            let other = self.focused_pane.other();
            self.focused_pane = if self.pane_is_empty(other) {
                PaneId::Primary
            } else {
                other
            };
        }

        self.sync_active_flags();
    }

    /// Keep a split link only when both ends name each other, the source in
    /// the primary pane and the mirror in the secondary pane
    fn drop_dangling_links(&mut self) {
        let links: Vec<(TabId, PaneId, Option<TabId>, Option<TabId>)> = self
            .tabs
            .iter()
            .map(|t| {
                (
                    t.id.clone(),
                    t.pane,
                    t.split.as_ref().map(|s| s.mirror.clone()),
                    t.mirror_of.clone(),
                )
            })
            .collect();
        let linked = |source: &TabId, mirror: &TabId| {
            links.iter().any(|(id, pane, split, _)| {
                id == source && *pane == PaneId::Primary && split.as_ref() == Some(mirror)
            }) && links.iter().any(|(id, pane, _, mirror_of)| {
                id == mirror && *pane == PaneId::Secondary && mirror_of.as_ref() == Some(source)
            })
        };

        for tab in &mut self.tabs {
            if let Some(split) = &tab.split
                && !linked(&tab.id, &split.mirror)
            {
                log::debug!("Dropping split link {} -> {}", tab.id, split.mirror);
                tab.split = None;
            }
            if let Some(source) = &tab.mirror_of
                && !linked(source, &tab.id)
            {
                log::debug!("Dropping mirror link {} -> {}", tab.id, source);
                tab.mirror_of = None;
            }
        }
    }

    fn sync_active_flags(&mut self) {
        for tab in &mut self.tabs {
            tab.is_active = self.active.get(&tab.pane) == Some(&tab.id);
        }
    }
}

impl Default for TabManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tab::TabKind;

    fn open(mgr: &mut TabManager, path: &str) -> TabId {
        mgr.open_tab(TabDescriptor::for_path(path))
    }

    fn ids(mgr: &TabManager) -> Vec<String> {
        mgr.tabs().iter().map(|t| t.id.to_string()).collect()
    }

    fn active_count(mgr: &TabManager, pane: PaneId) -> usize {
        mgr.tabs_in_pane(pane).filter(|t| t.is_active).count()
    }

    #[test]
    fn open_tab_activates_new_tab() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        let people = open(&mut mgr, "/people");

        assert_eq!(mgr.active_tab().map(|t| &t.id), Some(&people));
        assert_eq!(active_count(&mgr, PaneId::Primary), 1);
    }

    #[test]
    fn open_tab_with_existing_id_activates() {
        let mut mgr = TabManager::new();
        let dash = open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");

        let again = mgr.open_tab(TabDescriptor::for_path("/dashboard").with_id(dash.clone()));
        assert_eq!(again, dash);
        assert_eq!(mgr.tab_count(), 2);
        assert!(mgr.get_tab("dashboard").unwrap().is_active);
    }

    #[test]
    fn open_same_path_twice_disambiguates() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/calendar");
        open(&mut mgr, "/calendar");
        open(&mut mgr, "/calendar");
        assert_eq!(ids(&mgr), vec!["calendar", "calendar-1", "calendar-2"]);
    }

    #[test]
    fn set_active_unknown_is_noop() {
        let mut mgr = TabManager::new();
        let dash = open(&mut mgr, "/dashboard");
        assert!(!mgr.set_active_tab_id("nope"));
        assert_eq!(mgr.active_tab().map(|t| &t.id), Some(&dash));
    }

    #[test]
    fn close_inactive_keeps_active() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        let people = open(&mut mgr, "/people");

        assert!(mgr.close_tab("dashboard").is_some());
        assert_eq!(mgr.tab_count(), 2);
        assert_eq!(mgr.active_tab().map(|t| &t.id), Some(&people));
    }

    #[test]
    fn close_active_falls_back_to_most_recently_opened() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        let calendar = open(&mut mgr, "/calendar");
        open(&mut mgr, "/people");
        mgr.set_active_tab_id("dashboard");
        // Reorder so tab-bar position and open order disagree
        mgr.move_tab_to_index("calendar", 2);

        mgr.close_tab("dashboard");
        // people was opened after calendar
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("people"));

        mgr.close_tab("people");
        assert_eq!(mgr.active_tab().map(|t| &t.id), Some(&calendar));

        mgr.close_tab("calendar");
        assert!(mgr.active_tab().is_none());
        assert!(mgr.active_tab_id(PaneId::Primary).is_none());
    }

    #[test]
    fn close_unknown_is_noop() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        assert!(mgr.close_tab("missing").is_none());
        assert_eq!(mgr.tab_count(), 1);
    }

    #[test]
    fn close_all_keeps_pinned() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        open(&mut mgr, "/people");
        mgr.toggle_tab_pinned("calendar");

        let removed = mgr.close_all_tabs();
        assert_eq!(removed.len(), 2);
        assert_eq!(ids(&mgr), vec!["calendar"]);
        assert!(mgr.get_tab("calendar").unwrap().is_active);
    }

    #[test]
    fn toggle_pinned_does_not_change_activation() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        let cal = open(&mut mgr, "/calendar");
        assert_eq!(mgr.toggle_tab_pinned("dashboard"), Some(true));
        assert_eq!(mgr.active_tab().map(|t| &t.id), Some(&cal));
        assert_eq!(mgr.toggle_tab_pinned("dashboard"), Some(false));
        assert_eq!(mgr.toggle_tab_pinned("nope"), None);
    }

    #[test]
    fn duplicate_inserts_after_source() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        mgr.toggle_tab_pinned("dashboard");

        let copy = mgr.duplicate_tab("dashboard").unwrap();
        assert_eq!(copy, "dashboard-1");
        assert_eq!(ids(&mgr), vec!["dashboard", "dashboard-1", "calendar"]);
        let copied = mgr.get_tab("dashboard-1").unwrap();
        assert!(copied.is_active);
        assert!(!copied.is_pinned);
        assert_eq!(copied.pane, PaneId::Primary);
        assert_eq!(mgr.duplicate_tab("missing"), None);
    }

    #[test]
    fn update_tab_merges_fields() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/projects/apollo");
        assert!(mgr.update_tab(
            "projects-apollo",
            TabPatch {
                title: Some("Apollo 2".to_string()),
                is_dirty: Some(true),
                ..TabPatch::default()
            }
        ));
        let tab = mgr.get_tab("projects-apollo").unwrap();
        assert_eq!(tab.title, "Apollo 2");
        assert_eq!(tab.kind, TabKind::Project);
        assert!(tab.is_dirty);
        assert!(!mgr.update_tab("nope", TabPatch::default()));
    }

    #[test]
    fn split_creates_mirror_in_secondary() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/calendar");

        let result = mgr.toggle_split_view("calendar", Some(SplitDirection::Down));
        assert_eq!(
            result,
            Some(SplitToggle::Split {
                mirror: TabId::new("calendar-1")
            })
        );
        let source = mgr.get_tab("calendar").unwrap();
        assert!(source.is_split());
        assert_eq!(source.split_direction(), Some(SplitDirection::Down));
        let mirror = mgr.get_tab("calendar-1").unwrap();
        assert_eq!(mirror.pane, PaneId::Secondary);
        assert_eq!(mirror.mirror_of, Some(TabId::new("calendar")));
        assert!(mirror.is_active);
        assert!(source.is_active);
        assert_eq!(mgr.focused_pane(), PaneId::Primary);
    }

    #[test]
    fn split_uses_default_direction() {
        let mut mgr = TabManager::with_split_direction(SplitDirection::Left);
        open(&mut mgr, "/calendar");
        mgr.toggle_split_view("calendar", None);
        assert_eq!(
            mgr.get_tab("calendar").unwrap().split_direction(),
            Some(SplitDirection::Left)
        );
    }

    #[test]
    fn split_round_trip_restores_membership() {
        for &direction in SplitDirection::all() {
            let mut mgr = TabManager::new();
            open(&mut mgr, "/dashboard");
            open(&mut mgr, "/calendar");
            let before = ids(&mgr);

            mgr.toggle_split_view("calendar", Some(direction));
            assert!(mgr.is_split_layout());
            mgr.toggle_split_view("calendar", None);

            assert_eq!(ids(&mgr), before);
            assert!(!mgr.is_split_layout());
            assert!(!mgr.get_tab("calendar").unwrap().is_split());
        }
    }

    #[test]
    fn secondary_tab_cannot_split() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/calendar");
        mgr.toggle_split_view("calendar", None);
        assert_eq!(mgr.toggle_split_view("calendar-1", None), None);
        assert_eq!(mgr.tab_count(), 2);
    }

    #[test]
    fn closing_split_source_closes_mirror() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        mgr.toggle_split_view("calendar", None);

        mgr.close_tab("calendar");
        assert_eq!(ids(&mgr), vec!["dashboard"]);
        assert!(mgr.active_tab_id(PaneId::Secondary).is_none());
    }

    #[test]
    fn closing_mirror_unsplits_source() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/calendar");
        mgr.toggle_split_view("calendar", None);

        mgr.close_tab("calendar-1");
        assert!(!mgr.get_tab("calendar").unwrap().is_split());
        assert!(!mgr.is_split_layout());
    }

    #[test]
    fn close_all_clears_split_of_pinned_source() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/calendar");
        mgr.toggle_tab_pinned("calendar");
        mgr.toggle_split_view("calendar", None);

        mgr.close_all_tabs();
        assert_eq!(ids(&mgr), vec!["calendar"]);
        assert!(!mgr.get_tab("calendar").unwrap().is_split());
    }

    #[test]
    fn focus_moves_when_focused_pane_empties() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        let docs = mgr.open_tab(TabDescriptor::for_path("/explorer").in_pane(PaneId::Secondary));
        assert_eq!(mgr.focused_pane(), PaneId::Secondary);

        mgr.close_tab(docs.as_str());
        assert_eq!(mgr.focused_pane(), PaneId::Primary);
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("dashboard"));
    }

    #[test]
    fn close_pane_removes_pane_tabs() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        mgr.toggle_split_view("calendar", None);
        mgr.open_tab(TabDescriptor::for_path("/people").in_pane(PaneId::Secondary));

        let removed = mgr.close_pane(PaneId::Secondary);
        assert_eq!(removed.len(), 2);
        assert!(!mgr.get_tab("calendar").unwrap().is_split());
        assert_eq!(mgr.focused_pane(), PaneId::Primary);
    }

    #[test]
    fn next_and_prev_wrap_within_pane() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/dashboard");
        open(&mut mgr, "/calendar");
        open(&mut mgr, "/people");

        mgr.next_tab();
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("dashboard"));
        mgr.prev_tab();
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("people"));
        assert!(mgr.switch_to_index(2));
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("calendar"));
        assert!(!mgr.switch_to_index(0));
        assert!(!mgr.switch_to_index(9));
    }

    #[test]
    fn move_tab_to_index_within_pane() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/a");
        open(&mut mgr, "/b");
        open(&mut mgr, "/c");
        open(&mut mgr, "/d");

        assert!(mgr.move_tab_to_index("a", 2));
        assert_eq!(ids(&mgr), vec!["b", "c", "a", "d"]);
        assert!(mgr.move_tab_to_index("d", 0));
        assert_eq!(ids(&mgr), vec!["d", "b", "c", "a"]);
        assert!(!mgr.move_tab_to_index("b", 1));
        assert!(mgr.move_tab_to_index("b", 100));
        assert_eq!(ids(&mgr), vec!["d", "c", "a", "b"]);
        assert!(!mgr.move_tab_to_index("zz", 0));
    }

    #[test]
    fn move_tab_skips_other_pane_slots() {
        let mut mgr = TabManager::new();
        open(&mut mgr, "/a");
        mgr.open_tab(TabDescriptor::for_path("/x").in_pane(PaneId::Secondary));
        open(&mut mgr, "/b");

        assert!(mgr.move_tab_to_index("b", 0));
        assert_eq!(ids(&mgr), vec!["b", "x", "a"]);
    }

    #[test]
    fn restore_drops_duplicates_and_repairs_active() {
        let mut source = TabManager::new();
        open(&mut source, "/dashboard");
        open(&mut source, "/calendar");
        let mut tabs = source.tabs().to_vec();
        tabs.push(tabs[0].clone());

        let mgr = TabManager::restore(
            tabs,
            [(PaneId::Primary, TabId::new("gone"))],
            PaneId::Secondary,
            SplitDirection::Right,
        );
        assert_eq!(ids(&mgr), vec!["dashboard", "calendar"]);
        assert_eq!(mgr.focused_pane(), PaneId::Primary);
        assert_eq!(active_count(&mgr, PaneId::Primary), 1);
        assert_eq!(mgr.active_tab().map(|t| t.id.as_str()), Some("calendar"));
    }

    #[test]
    fn restore_keeps_open_order_for_close_fallback() {
        let mut live = TabManager::new();
        open(&mut live, "/a");
        open(&mut live, "/b");
        open(&mut live, "/c");
        live.move_tab_to_index("c", 0);
        live.set_active_tab_id("a");

        let mut restored = TabManager::restore(
            live.tabs().to_vec(),
            [(PaneId::Primary, TabId::new("a"))],
            PaneId::Primary,
            SplitDirection::Right,
        );
        assert_eq!(ids(&restored), vec!["c", "a", "b"]);

        live.close_tab("a");
        restored.close_tab("a");
        assert_eq!(live.active_tab().map(|t| t.id.as_str()), Some("c"));
        assert_eq!(restored.active_tab().map(|t| t.id.as_str()), Some("c"));

        // New tabs still count as the most recently opened
        let d = open(&mut restored, "/d");
        restored.set_active_tab_id("b");
        restored.close_tab("b");
        assert_eq!(restored.active_tab().map(|t| &t.id), Some(&d));
    }

    #[test]
    fn restore_clears_links_that_are_not_reciprocal() {
        let mut source = TabManager::new();
        open(&mut source, "/calendar");
        open(&mut source, "/people");
        source.toggle_split_view("calendar", None);
        source.toggle_split_view("people", None);

        let mut tabs = source.tabs().to_vec();
        // calendar lost its split record, its mirror still points back
        tabs[0].split = None;
        // people was moved to the secondary pane with its link intact
        tabs[1].pane = PaneId::Secondary;

        let mut mgr = TabManager::restore(
            tabs,
            Vec::<(PaneId, TabId)>::new(),
            PaneId::Primary,
            SplitDirection::Right,
        );
        assert!(mgr.tabs().iter().all(|t| !t.is_split() && !t.is_mirror()));

        // Closing calendar no longer takes the former mirror with it
        mgr.close_tab("calendar");
        assert!(mgr.contains("calendar-1"));
    }
}
