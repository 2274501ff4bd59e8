//! Polls the backing store, fetches a fresh snapshot, and carries UI state
//! across the swap.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::Semaphore;

use crate::error::Result;
use crate::model::{Comment, Forest};
use crate::store::BackendClient;
use crate::tree::{ExpansionState, TreeProjection};

use super::digest::{build_digest, compute_diff_stats, Digest, DiffStats};
use super::probe::DbProbe;
use super::transfer::{
    capture_comments, capture_cursor, capture_expansion, reapply_comments, reapply_cursor,
    reapply_expansion,
};

/// Bound on concurrent comment-preload fetches.
pub const COMMENT_PRELOAD_CONCURRENCY: usize = 8;

/// The outcome of one successful refresh pass, before state transfer.
pub struct RefreshOutcome {
    pub forest: Forest,
    pub digest: Digest,
    pub diff: DiffStats,
    pub db_mod_time: SystemTime,
}

/// Owns polling state (last digest, last mod time, in-flight flag) and the
/// shared comment-preload semaphore.
pub struct RefreshEngine {
    client: Arc<dyn BackendClient>,
    probe: Arc<dyn DbProbe>,
    db_path: PathBuf,
    last_db_mod_time: Option<SystemTime>,
    last_digest: Digest,
    refresh_in_flight: bool,
    comment_semaphore: Arc<Semaphore>,
}

/// The pieces of a [`RefreshEngine`] needed to run one refresh pass off the
/// main update loop, detached from the `&mut` bookkeeping fields so the
/// async task holds no borrow across its `.await` points.
#[derive(Clone)]
pub struct RefreshHandle {
    client: Arc<dyn BackendClient>,
    probe: Arc<dyn DbProbe>,
    db_path: PathBuf,
    last_digest: Digest,
}

/// Runs one detached refresh pass: export, build, digest, diff. Mirrors
/// [`RefreshEngine::run_refresh`] but over a cloned handle instead of `&self`,
/// so it can be awaited inside a spawned command without borrowing the
/// engine across the suspension point.
pub async fn execute_refresh(handle: RefreshHandle) -> Result<RefreshOutcome> {
    let issues = handle.client.export().await?;
    let forest = Forest::build(issues);
    let digest = build_digest(&forest);
    let diff = compute_diff_stats(&handle.last_digest, &digest);
    let db_mod_time = handle
        .probe
        .latest_mod_time(&handle.db_path)
        .unwrap_or_else(|_| SystemTime::now());
    Ok(RefreshOutcome { forest, digest, diff, db_mod_time })
}

impl RefreshEngine {
    pub fn new(client: Arc<dyn BackendClient>, probe: Arc<dyn DbProbe>, db_path: PathBuf) -> Self {
        Self {
            client,
            probe,
            db_path,
            last_db_mod_time: None,
            last_digest: Digest::new(),
            refresh_in_flight: false,
            comment_semaphore: Arc::new(Semaphore::new(COMMENT_PRELOAD_CONCURRENCY)),
        }
    }

    pub fn refresh_in_flight(&self) -> bool {
        self.refresh_in_flight
    }

    /// Whether a tick should issue a refresh: a newer mtime than the last
    /// completed refresh, and nothing already in flight. A probe failure
    /// (e.g. the database vanished) propagates as an error rather than
    /// silently skipping the tick.
    pub fn should_poll_refresh(&self) -> Result<bool> {
        if self.refresh_in_flight {
            return Ok(false);
        }
        let current = self.probe.latest_mod_time(&self.db_path)?;
        Ok(match self.last_db_mod_time {
            Some(last) => current > last,
            None => true,
        })
    }

    /// Marks a refresh as started. Call before spawning the async refresh
    /// task so a tick landing mid-flight sees `refresh_in_flight() == true`.
    pub fn begin_refresh(&mut self) {
        self.refresh_in_flight = true;
    }

    /// Runs one refresh pass: export, build, digest, diff. Does not mutate
    /// engine state (callers commit via [`RefreshEngine::commit_refresh`]).
    pub async fn run_refresh(&self) -> Result<RefreshOutcome> {
        let issues = self.client.export().await?;
        let forest = Forest::build(issues);
        let digest = build_digest(&forest);
        let diff = compute_diff_stats(&self.last_digest, &digest);
        let db_mod_time = self
            .probe
            .latest_mod_time(&self.db_path)
            .unwrap_or_else(|_| SystemTime::now());
        Ok(RefreshOutcome { forest, digest, diff, db_mod_time })
    }

    /// Records a successful refresh's digest/mod-time as the new baseline
    /// and clears the in-flight flag.
    pub fn commit_refresh(&mut self, digest: Digest, db_mod_time: SystemTime) {
        self.last_digest = digest;
        self.last_db_mod_time = Some(db_mod_time);
        self.refresh_in_flight = false;
    }

    /// Clears the in-flight flag after a failed refresh, leaving the digest
    /// baseline untouched so the next successful refresh still diffs
    /// correctly.
    pub fn fail_refresh(&mut self) {
        self.refresh_in_flight = false;
    }

    /// Fetches comments for one issue, gated by the shared semaphore so at
    /// most [`COMMENT_PRELOAD_CONCURRENCY`] fetches run at once.
    pub async fn preload_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        let _permit = self
            .comment_semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("comment semaphore is never closed");
        self.client.comments(issue_id).await
    }

    /// A cheaply-cloned snapshot of the pieces needed to run a refresh or
    /// preload comments off the main update loop.
    pub fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            client: self.client.clone(),
            probe: self.probe.clone(),
            db_path: self.db_path.clone(),
            last_digest: self.last_digest.clone(),
        }
    }

    /// The shared client, for one-off detached calls (comment preload,
    /// mutation commands) that don't need the rest of the engine.
    pub fn client(&self) -> Arc<dyn BackendClient> {
        self.client.clone()
    }

    /// Detached comment preload: gated by the same bounded semaphore as
    /// [`RefreshEngine::preload_comments`], usable from a spawned command.
    pub fn comment_preload_task(
        &self,
        issue_id: String,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>>> + Send + 'static {
        let client = self.client.clone();
        let semaphore = self.comment_semaphore.clone();
        async move {
            let _permit = semaphore.acquire_owned().await.expect("comment semaphore is never closed");
            client.comments(&issue_id).await
        }
    }
}

/// Implements the five-step state transfer: capture expansion, comments,
/// and cursor against `old_forest`, swap in `new_forest`, then reapply.
/// Entries whose issue id no longer resolves are dropped silently.
pub fn transfer_state(old_forest: &Forest, mut new_forest: Forest, projection: &mut TreeProjection) -> Forest {
    let expansion_snapshot = capture_expansion(old_forest, &projection.expansion);
    let comment_snapshot = capture_comments(old_forest);
    let cursor_snapshot = capture_cursor(old_forest, projection.rows(), &projection.viewport);

    reapply_comments(&mut new_forest, comment_snapshot);

    let mut expansion = ExpansionState::new();
    reapply_expansion(&new_forest, expansion_snapshot, &mut expansion);
    projection.expansion = expansion;

    projection.rebuild(&new_forest);
    reapply_cursor(&new_forest, projection.rows(), &mut projection.viewport, cursor_snapshot);

    new_forest
}
