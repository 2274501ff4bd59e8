//! Per-instance expansion state, keyed by `parentId:nodeId`.

use std::collections::HashMap;

use crate::model::NodeId;

/// The key used throughout the expansion/filter maps: `(parentId, nodeId)`,
/// with `parentId = None` for roots.
pub type RowKey = (Option<NodeId>, NodeId);

/// Tracks which `(parent, node)` instances are expanded.
///
/// A node can be expanded under one parent while collapsed under another,
/// because the same node may appear in multiple rows (multi-parent DAG).
#[derive(Clone, Debug, Default)]
pub struct ExpansionState {
    expanded: HashMap<RowKey, bool>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, key: RowKey) -> bool {
        self.expanded.get(&key).copied().unwrap_or(false)
    }

    pub fn set(&mut self, key: RowKey, expanded: bool) {
        self.expanded.insert(key, expanded);
    }

    pub fn toggle(&mut self, key: RowKey) {
        let current = self.is_expanded(key);
        self.set(key, !current);
    }

    pub fn expand_all(&mut self, keys: impl IntoIterator<Item = RowKey>) {
        for key in keys {
            self.expanded.insert(key, true);
        }
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Returns the raw key set for state transfer across a refresh.
    pub fn snapshot(&self) -> HashMap<RowKey, bool> {
        self.expanded.clone()
    }

    pub fn restore(&mut self, snapshot: HashMap<RowKey, bool>) {
        self.expanded = snapshot;
    }
}

/// Filter-only expansion bookkeeping, active only while a filter is set.
///
/// `forced_expanded` surfaces nodes with a descendant match; `user_collapsed`
/// records explicit user collapses over those, which are honored.
#[derive(Clone, Debug, Default)]
pub struct FilterExpansion {
    pub forced_expanded: HashMap<RowKey, bool>,
    pub user_collapsed: HashMap<RowKey, bool>,
}

impl FilterExpansion {
    pub fn clear(&mut self) {
        self.forced_expanded.clear();
        self.user_collapsed.clear();
    }

    pub fn is_visible_expanded(&self, key: RowKey) -> bool {
        let forced = self.forced_expanded.get(&key).copied().unwrap_or(false);
        let collapsed = self.user_collapsed.get(&key).copied().unwrap_or(false);
        forced && !collapsed
    }
}
