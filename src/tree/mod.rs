//! TreeProjection: turns the arena-indexed [`Forest`](crate::model::Forest)
//! into a flat, scrollable list of [`TreeRow`]s honoring sort order,
//! per-instance expansion, and an optional search filter.

mod expansion;
mod filter;
mod layout;
mod sort;
mod viewport;

pub use expansion::{ExpansionState, FilterExpansion, RowKey};
pub use filter::FilterEngine;
pub use layout::{
    format_relative_time, layout_mode, truncate_with_ellipsis, wrap_with_hanging_indent, LayoutMode,
    COLUMN_MODE_MIN_WIDTH, LABELS_MIN_WIDTH,
};
pub use search::{tokenize, ParseResult, Query, SuggestionMode, Token};
pub use viewport::TreeViewport;

mod search;

use crate::model::{Forest, NodeId, TreeRow};

/// Ties expansion, filter, sort, and viewport bookkeeping to one forest
/// snapshot, recomputing visible rows whenever any input changes.
#[derive(Clone, Debug, Default)]
pub struct TreeProjection {
    pub expansion: ExpansionState,
    pub filter_expansion: FilterExpansion,
    pub filter: FilterEngine,
    pub viewport: TreeViewport,
    rows: Vec<TreeRow>,
}

impl TreeProjection {
    pub fn new(height: usize) -> Self {
        Self {
            viewport: TreeViewport::new(height),
            ..Default::default()
        }
    }

    pub fn rows(&self) -> &[TreeRow] {
        &self.rows
    }

    pub fn set_filter_text(&mut self, text: &str, forest: &Forest) {
        self.filter.set_text(text, forest);
        self.filter.apply_forced_expansion(forest, &mut self.filter_expansion);
        self.rebuild(forest);
    }

    pub fn clear_filter(&mut self, forest: &Forest) {
        self.filter.set_text("", forest);
        self.filter_expansion.clear();
        self.rebuild(forest);
    }

    pub fn toggle(&mut self, key: RowKey) {
        if self.filter.is_active() {
            let collapsed = self.filter_expansion.user_collapsed.get(&key).copied().unwrap_or(false);
            self.filter_expansion.user_collapsed.insert(key, !collapsed);
        } else {
            self.expansion.toggle(key);
        }
    }

    /// Whether the row keyed by `(parent, node)` currently shows its
    /// children, honoring the active filter's forced-expansion.
    pub fn is_expanded(&self, key: RowKey) -> bool {
        if self.filter.is_active() {
            self.filter_expansion.is_visible_expanded(key)
        } else {
            self.expansion.is_expanded(key)
        }
    }

    /// Recomputes the flat visible-row list from scratch. Call after any
    /// change to the forest, expansion, or filter state.
    pub fn rebuild(&mut self, forest: &Forest) {
        let last_identity = self.viewport.current_identity(&self.rows);

        let mut roots = forest.roots.clone();
        sort::sort_roots(forest, &mut roots);
        roots.retain(|id| self.filter.is_visible(*id));

        let mut rows = Vec::new();
        for root in roots {
            self.push_subtree(forest, root, None, 0, &mut rows);
        }
        self.rows = rows;

        if let Some(identity) = last_identity {
            self.viewport.reseek(&self.rows, identity);
        } else {
            self.viewport.clamp(self.rows.len());
        }
    }

    fn push_subtree(
        &self,
        forest: &Forest,
        id: NodeId,
        parent: Option<NodeId>,
        depth: usize,
        out: &mut Vec<TreeRow>,
    ) {
        out.push(TreeRow { node: id, parent, depth });

        let key: RowKey = (parent, id);
        if !self.is_expanded(key) {
            return;
        }

        let mut children = forest.node(id).children.clone();
        children.retain(|c| self.filter.is_visible(*c));
        sort::sort_subtasks(forest, &mut children);

        for child in children {
            self.push_subtree(forest, child, Some(id), depth + 1, out);
        }
    }
}
