//! Ties the search grammar to expansion state: forces open any node with a
//! matching descendant, while still honoring explicit user collapses.

use std::collections::HashMap;

use crate::model::{Forest, NodeId};

use super::expansion::{FilterExpansion, RowKey};
use super::search::{evaluate, FilterMatch, Query};

/// Owns the active filter text and its memoized per-node match results.
#[derive(Clone, Debug, Default)]
pub struct FilterEngine {
    text: String,
    query: Query,
    matches: HashMap<NodeId, FilterMatch>,
}

impl FilterEngine {
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Re-parses `text` and recomputes matches against `forest`. Call this
    /// whenever the filter text changes or the forest is replaced.
    pub fn set_text(&mut self, text: &str, forest: &Forest) {
        self.text = text.to_string();
        self.query = Query::parse(text);
        self.recompute(forest);
    }

    pub fn recompute(&mut self, forest: &Forest) {
        self.matches = if self.query.is_empty() {
            HashMap::new()
        } else {
            evaluate(forest, &self.query)
        };
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        if !self.is_active() {
            return true;
        }
        self.matches.get(&id).map(FilterMatch::visible).unwrap_or(false)
    }

    /// Marks every `(parent, node)` row whose node has a descendant match as
    /// forced-expanded; user collapses recorded in `filter_expansion` still
    /// win (see [`FilterExpansion::is_visible_expanded`]).
    pub fn apply_forced_expansion(&self, forest: &Forest, filter_expansion: &mut FilterExpansion) {
        filter_expansion.forced_expanded.clear();
        if !self.is_active() {
            return;
        }
        for i in 0..forest.len() {
            let id = NodeId(i);
            let forces_open = self
                .matches
                .get(&id)
                .map(|m| m.descendant_match)
                .unwrap_or(false);
            if !forces_open {
                continue;
            }
            for &child in &forest.node(id).children {
                let key: RowKey = (Some(id), child);
                filter_expansion.forced_expanded.insert(key, true);
            }
        }
    }
}
