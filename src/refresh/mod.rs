//! RefreshEngine: polls the backing store for changes, fetches a fresh
//! snapshot, and transfers UI state (expansion, cached comments, cursor)
//! across the forest swap.

mod digest;
mod engine;
mod probe;
mod transfer;

pub use digest::{build_digest, compute_diff_stats, Digest, DiffStats};
pub use engine::{
    execute_refresh, transfer_state, RefreshEngine, RefreshHandle, RefreshOutcome,
    COMMENT_PRELOAD_CONCURRENCY,
};
pub use probe::{DbProbe, FileDbProbe};
