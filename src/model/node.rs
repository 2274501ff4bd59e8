//! Arena-indexed DAG of issues.
//!
//! Nodes live in a `Forest`'s arena and reference each other by [`NodeId`]
//! rather than by pointer, so the whole arena can be replaced atomically on
//! refresh without invalidating anything held across the swap.

use std::collections::{HashMap, HashSet};

use super::issue::{Issue, Status};

/// An index into a [`Forest`]'s node arena. Stable only within one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// A graph vertex wrapping an [`Issue`] with attributes derived at build time.
#[derive(Clone, Debug)]
pub struct Node {
    pub issue: Issue,
    pub children: Vec<NodeId>,
    pub parents: HashSet<NodeId>,
    pub blocked_by: Vec<NodeId>,
    pub blocks: Vec<NodeId>,
    pub is_blocked: bool,
    pub has_in_progress: bool,
    pub has_ready: bool,
    pub comments_loaded: bool,
    pub comment_error: Option<String>,
}

impl Node {
    fn new(issue: Issue) -> Self {
        Self {
            issue,
            children: Vec::new(),
            parents: HashSet::new(),
            blocked_by: Vec::new(),
            blocks: Vec::new(),
            is_blocked: false,
            has_in_progress: false,
            has_ready: false,
            comments_loaded: false,
            comment_error: None,
        }
    }

    /// An open, non-blocked node: the first candidate to work on.
    pub fn is_ready(&self) -> bool {
        self.issue.status == Status::Open && !self.is_blocked
    }
}

/// The ordered sequence of root nodes plus the owning arena.
///
/// Ownership: the forest owns all nodes exclusively. Child/parent relations
/// are non-owning references resolved by id.
#[derive(Clone, Debug, Default)]
pub struct Forest {
    nodes: Vec<Node>,
    id_index: HashMap<String, NodeId>,
    pub roots: Vec<NodeId>,
}

impl Forest {
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn try_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, issue_id: &str) -> Option<NodeId> {
        self.id_index.get(issue_id).copied()
    }

    pub fn issue_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.issue.id.as_str())
    }

    /// Builds a forest from a flat issue list.
    ///
    /// A node's `parent_ids` field names the issues it depends on via a
    /// "parent-child" dependency edge. A node may have zero, one, or many
    /// parents; nodes with no parents are roots.
    pub fn build(issues: Vec<Issue>) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(issues.len());
        let mut id_index = HashMap::with_capacity(issues.len());

        for issue in issues {
            let id = NodeId(nodes.len());
            id_index.insert(issue.id.clone(), id);
            let mut node = Node::new(issue);
            node.comments_loaded = false;
            nodes.push(node);
        }

        // Resolve parent/child edges.
        let parent_edges: Vec<(NodeId, Vec<NodeId>)> = nodes
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let parents = n
                    .issue
                    .parent_ids
                    .iter()
                    .filter_map(|pid| id_index.get(pid).copied())
                    .collect();
                (NodeId(i), parents)
            })
            .collect();

        for (child, parents) in parent_edges {
            for parent in &parents {
                nodes[parent.0].children.push(child);
            }
            nodes[child.0].parents = parents.into_iter().collect();
        }

        // blocked_by / blocks roll up from non-closed parent-child edges: a
        // child is blocked by any parent that is not yet closed.
        for i in 0..nodes.len() {
            let id = NodeId(i);
            let blockers: Vec<NodeId> = nodes[i]
                .parents
                .iter()
                .copied()
                .filter(|p| nodes[p.0].issue.status != Status::Closed)
                .collect();
            nodes[i].is_blocked = !blockers.is_empty();
            nodes[i].blocked_by = blockers;
        }
        for i in 0..nodes.len() {
            for &blocker in &nodes[i].blocked_by.clone() {
                nodes[blocker.0].blocks.push(NodeId(i));
            }
        }

        let roots: Vec<NodeId> = (0..nodes.len())
            .map(NodeId)
            .filter(|id| nodes[id.0].parents.is_empty())
            .collect();

        let mut forest = Self {
            nodes,
            id_index,
            roots,
        };
        forest.roll_up_subtree_flags();
        forest
    }

    /// Rolls up `has_in_progress`/`has_ready` from each node's subtree.
    fn roll_up_subtree_flags(&mut self) {
        fn visit(forest: &mut Forest, id: NodeId, seen: &mut HashSet<NodeId>) -> (bool, bool) {
            if !seen.insert(id) {
                // Cycle guard: the DAG invariant forbids this, but refuse to
                // loop forever if it's ever violated by bad input data.
                return (false, false);
            }
            let mut has_in_progress = forest.node(id).issue.status == Status::InProgress;
            let mut has_ready = forest.node(id).is_ready();
            let children = forest.node(id).children.clone();
            for child in children {
                let (child_ip, child_ready) = visit(forest, child, seen);
                has_in_progress |= child_ip;
                has_ready |= child_ready;
            }
            let node = forest.node_mut(id);
            node.has_in_progress = has_in_progress;
            node.has_ready = has_ready;
            (has_in_progress, has_ready)
        }

        let roots = self.roots.clone();
        for root in roots {
            let mut seen = HashSet::new();
            visit(self, root, &mut seen);
        }
    }

    /// Counts each node exactly once across multi-parent occurrences.
    pub fn statistics(&self) -> Statistics {
        let mut stats = Statistics::default();
        for node in &self.nodes {
            stats.total += 1;
            match node.issue.status {
                Status::Open if !node.is_blocked => stats.ready += 1,
                Status::Open => {}
                Status::InProgress => stats.in_progress += 1,
                Status::Closed => stats.closed += 1,
                Status::Blocked => {}
                Status::Deferred => stats.deferred += 1,
            }
            if node.is_blocked {
                stats.blocked += 1;
            }
        }
        stats
    }
}

/// Aggregate counts over a snapshot, each node counted exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub ready: usize,
    pub in_progress: usize,
    pub closed: usize,
    pub blocked: usize,
    pub deferred: usize,
}
