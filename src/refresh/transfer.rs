//! Carries UI state across a forest swap: a new [`Forest`] is built fresh on
//! every refresh, so nothing tied to the old arena's [`NodeId`]s survives
//! automatically. Everything here keys on issue ids instead and re-resolves
//! against the new forest, dropping anything no longer present.

use crate::model::{Comment, Forest, TreeRow};
use crate::tree::{ExpansionState, RowKey, TreeViewport};

type IssueKey = (Option<String>, String);

/// Step 1: expansion state, translated from `(parentNodeId, nodeId)` to
/// `(parentIssueId, issueId)`.
pub struct ExpansionSnapshot {
    entries: Vec<(IssueKey, bool)>,
}

pub fn capture_expansion(old_forest: &Forest, expansion: &ExpansionState) -> ExpansionSnapshot {
    let entries = expansion
        .snapshot()
        .into_iter()
        .filter_map(|((parent, node), expanded)| {
            let node_id = old_forest.try_node(node)?.issue.id.clone();
            let parent_id = match parent {
                Some(p) => Some(old_forest.try_node(p)?.issue.id.clone()),
                None => None,
            };
            Some(((parent_id, node_id), expanded))
        })
        .collect();
    ExpansionSnapshot { entries }
}

/// Step 5a: re-resolves each entry against the new forest; unmatched ids
/// (renamed, deleted) are dropped silently.
pub fn reapply_expansion(
    new_forest: &Forest,
    snapshot: ExpansionSnapshot,
    expansion: &mut ExpansionState,
) {
    for ((parent_id, node_id), was_expanded) in snapshot.entries {
        let Some(node) = new_forest.find(&node_id) else { continue };
        let parent = match parent_id {
            Some(p) => match new_forest.find(&p) {
                Some(id) => Some(id),
                None => continue,
            },
            None => None,
        };
        let key: RowKey = (parent, node);
        expansion.set(key, was_expanded);
    }
}

/// Step 2: which nodes had comments loaded, and what they were.
pub struct CommentSnapshot {
    entries: Vec<(String, Vec<Comment>, Option<String>)>,
}

pub fn capture_comments(old_forest: &Forest) -> CommentSnapshot {
    let mut entries = Vec::new();
    for id in old_forest.issue_ids() {
        let node_id = old_forest.find(id).expect("issue_ids() returns known ids");
        let node = old_forest.node(node_id);
        if node.comments_loaded || node.comment_error.is_some() {
            entries.push((id.to_string(), node.issue.comments.clone(), node.comment_error.clone()));
        }
    }
    CommentSnapshot { entries }
}

/// Step 5b: writes cached comments back onto the matching new node.
pub fn reapply_comments(new_forest: &mut Forest, snapshot: CommentSnapshot) {
    for (id, comments, error) in snapshot.entries {
        let Some(node_id) = new_forest.find(&id) else { continue };
        let node = new_forest.node_mut(node_id);
        node.issue.comments = comments;
        node.comments_loaded = error.is_none();
        node.comment_error = error;
    }
}

/// Step 3: the focused row, by issue id rather than row index.
pub struct CursorSnapshot {
    parent_id: Option<String>,
    node_id: String,
}

pub fn capture_cursor(old_forest: &Forest, rows: &[TreeRow], viewport: &TreeViewport) -> Option<CursorSnapshot> {
    let row = rows.get(viewport.cursor)?;
    let node_id = old_forest.node(row.node).issue.id.clone();
    let parent_id = row.parent.map(|p| old_forest.node(p).issue.id.clone());
    Some(CursorSnapshot { parent_id, node_id })
}

/// Step 5c: seeks the row matching the captured identity in the freshly
/// rebuilt row list. Tries the exact `(parent, node)` pair first, falls back
/// to a node-id-only match (e.g. the node was reparented), and resets the
/// cursor to the top on a total miss (e.g. the node was deleted).
pub fn reapply_cursor(new_forest: &Forest, rows: &[TreeRow], viewport: &mut TreeViewport, snapshot: Option<CursorSnapshot>) {
    let Some(snapshot) = snapshot else { return };

    let exact = rows.iter().position(|row| {
        let node_matches = new_forest.node(row.node).issue.id == snapshot.node_id;
        let parent_matches = match (&snapshot.parent_id, row.parent) {
            (None, None) => true,
            (Some(expected), Some(actual)) => new_forest.node(actual).issue.id == *expected,
            _ => false,
        };
        node_matches && parent_matches
    });

    let found = exact.or_else(|| {
        rows.iter()
            .position(|row| new_forest.node(row.node).issue.id == snapshot.node_id)
    });

    viewport.cursor = found.unwrap_or(0);
    viewport.clamp(rows.len());
}
