//! Per-node fingerprints and the added/changed/removed summary between two
//! refresh snapshots.

use std::collections::HashMap;
use std::fmt;

use crate::model::Forest;

/// `id -> fingerprint` ("title|status|priority|updatedAt") for one snapshot.
pub type Digest = HashMap<String, String>;

pub fn build_digest(forest: &Forest) -> Digest {
    forest
        .issue_ids()
        .map(|id| {
            let node_id = forest.find(id).expect("issue_ids() returns known ids");
            (id.to_string(), forest.node(node_id).issue.fingerprint())
        })
        .collect()
}

/// Added/changed/removed counts between two digests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub changed: usize,
    pub removed: usize,
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} / Δ{} / -{}", self.added, self.changed, self.removed)
    }
}

/// Compares an old digest to a new one by id membership and fingerprint.
pub fn compute_diff_stats(old: &Digest, new: &Digest) -> DiffStats {
    let mut stats = DiffStats::default();
    for (id, fingerprint) in new {
        match old.get(id) {
            None => stats.added += 1,
            Some(old_fingerprint) if old_fingerprint != fingerprint => stats.changed += 1,
            Some(_) => {}
        }
    }
    for id in old.keys() {
        if !new.contains_key(id) {
            stats.removed += 1;
        }
    }
    stats
}
