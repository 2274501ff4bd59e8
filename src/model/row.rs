//! The flat, scrollable projection of a [`Forest`](super::node::Forest).

use super::node::NodeId;

/// A projected entry in the flat visible list.
///
/// The same [`NodeId`] may appear in multiple rows when the underlying node
/// has multiple parents; rows are distinct instances for cursor/expansion
/// purposes, so `TreeRow` is a plain value, never an index shared by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeRow {
    pub node: NodeId,
    pub parent: Option<NodeId>,
    pub depth: usize,
}

impl TreeRow {
    /// The `parentId:nodeID` identity used to key expansion/filter maps.
    pub fn identity_key(&self) -> (Option<NodeId>, NodeId) {
        (self.parent, self.node)
    }
}
