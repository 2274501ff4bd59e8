//! Ordering rules for rendering children, blockers, and roots.

use crate::model::{Forest, NodeId, Status};

/// Category rank used by [`sort_subtasks`]: lower sorts first.
fn subtask_category(forest: &Forest, id: NodeId) -> u8 {
    let node = forest.node(id);
    match node.issue.status {
        Status::InProgress => 0,
        Status::Open if !node.is_blocked => 1, // ready
        Status::Blocked => 3,
        _ if node.is_blocked => 3,
        Status::Deferred => 4,
        Status::Closed => 5,
        Status::Open => 1,
    }
}

/// `sortSubtasks`: in_progress < ready < blocked < deferred < closed; within
/// ready, more unblocking impact (`len(blocks)`) first; within blocked,
/// fewer `blockedBy` first; then priority ascending; then id.
pub fn sort_subtasks(forest: &Forest, children: &mut [NodeId]) {
    children.sort_by(|&a, &b| {
        let (ca, cb) = (subtask_category(forest, a), subtask_category(forest, b));
        ca.cmp(&cb)
            .then_with(|| {
                if ca == 1 {
                    // ready: more unblocking impact first (descending).
                    forest.node(b).blocks.len().cmp(&forest.node(a).blocks.len())
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| {
                if ca == 3 {
                    // blocked: fewer blockedBy first (ascending).
                    forest
                        .node(a)
                        .blocked_by
                        .len()
                        .cmp(&forest.node(b).blocked_by.len())
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| forest.node(a).issue.priority.cmp(&forest.node(b).issue.priority))
            .then_with(|| forest.node(a).issue.id.cmp(&forest.node(b).issue.id))
    });
}

fn status_rank(status: Status) -> u8 {
    match status {
        Status::InProgress => 0,
        Status::Open => 1,
        Status::Blocked => 2,
        Status::Deferred => 3,
        Status::Closed => 4,
    }
}

/// `sortBlockers`: closed last; among rest, fewer `blockedBy` first; then
/// status rank; then priority; then id.
pub fn sort_blockers(forest: &Forest, blockers: &mut [NodeId]) {
    blockers.sort_by(|&a, &b| {
        let closed_a = forest.node(a).issue.status == Status::Closed;
        let closed_b = forest.node(b).issue.status == Status::Closed;
        closed_a
            .cmp(&closed_b)
            .then_with(|| {
                forest
                    .node(a)
                    .blocked_by
                    .len()
                    .cmp(&forest.node(b).blocked_by.len())
            })
            .then_with(|| status_rank(forest.node(a).issue.status).cmp(&status_rank(forest.node(b).issue.status)))
            .then_with(|| forest.node(a).issue.priority.cmp(&forest.node(b).issue.priority))
            .then_with(|| forest.node(a).issue.id.cmp(&forest.node(b).issue.id))
    });
}

/// `sortBlocked`: fewer `blockedBy` first (closer to ready); priority; id.
pub fn sort_blocked(forest: &Forest, blocked: &mut [NodeId]) {
    blocked.sort_by(|&a, &b| {
        forest
            .node(a)
            .blocked_by
            .len()
            .cmp(&forest.node(b).blocked_by.len())
            .then_with(|| forest.node(a).issue.priority.cmp(&forest.node(b).issue.priority))
            .then_with(|| forest.node(a).issue.id.cmp(&forest.node(b).issue.id))
    });
}

/// Root sort: `hasInProgress < hasReady < other`; tie-break by `createdAt`
/// ascending.
pub fn sort_roots(forest: &Forest, roots: &mut [NodeId]) {
    roots.sort_by(|&a, &b| {
        let rank = |id: NodeId| -> u8 {
            let n = forest.node(id);
            if n.has_in_progress {
                0
            } else if n.has_ready {
                1
            } else {
                2
            }
        };
        rank(a)
            .cmp(&rank(b))
            .then_with(|| forest.node(a).issue.created_at.cmp(&forest.node(b).issue.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, Issue, IssueType, Priority};
    use chrono::{Duration, Utc};

    fn issue(id: &str, status: Status, priority: u8) -> Issue {
        let now = Utc::now();
        Issue {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            design: String::new(),
            acceptance: String::new(),
            status,
            priority: Priority(priority),
            issue_type: IssueType::Task,
            labels: vec![],
            assignee: None,
            created_at: now,
            updated_at: now,
            parent_ids: vec![],
            comments: Vec::<Comment>::new(),
        }
    }

    #[test]
    fn subtasks_rank_in_progress_before_ready_before_closed() {
        let issues = vec![
            issue("z-closed", Status::Closed, 2),
            issue("a-progress", Status::InProgress, 2),
            issue("m-ready", Status::Open, 2),
        ];
        let forest = Forest::build(issues);
        let mut ids: Vec<NodeId> = (0..forest.len()).map(NodeId).collect();
        sort_subtasks(&forest, &mut ids);
        let order: Vec<&str> = ids.iter().map(|id| forest.node(*id).issue.id.as_str()).collect();
        assert_eq!(order, vec!["a-progress", "m-ready", "z-closed"]);
    }

    #[test]
    fn roots_with_in_progress_subtree_sort_first() {
        let mut older = issue("ab-old", Status::Closed, 2);
        older.created_at = Utc::now() - Duration::days(1);
        let newer = issue("ab-new", Status::Closed, 2);
        let issues = vec![older, newer];
        let forest = Forest::build(issues);
        let mut ids: Vec<NodeId> = forest.roots.clone();
        sort_roots(&forest, &mut ids);
        assert_eq!(forest.node(ids[0]).issue.id, "ab-old");
    }
}
