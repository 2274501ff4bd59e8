//! The closed message taxonomy EventCore dispatches: clock ticks, I/O
//! completions, overlay confirmations, and raw input.

use std::time::SystemTime;

use crossterm::event::KeyEvent;

use crate::model::Comment;
use crate::overlays::{CommentAdded, DeleteConfirmed, FormSubmission, LabelsUpdated, StatusChanged};
use crate::refresh::{Digest, DiffStats, RefreshOutcome};

/// A refresh pass's result, carried across the async boundary as a message.
#[derive(Clone, Debug)]
pub struct RefreshCompletion {
    pub forest: Option<crate::model::Forest>,
    pub digest: Digest,
    pub diff: DiffStats,
    pub db_mod_time: Option<SystemTime>,
    pub err: Option<String>,
}

impl From<RefreshOutcome> for RefreshCompletion {
    fn from(outcome: RefreshOutcome) -> Self {
        Self {
            forest: Some(outcome.forest),
            digest: outcome.digest,
            diff: outcome.diff,
            db_mod_time: Some(outcome.db_mod_time),
            err: None,
        }
    }
}

impl RefreshCompletion {
    pub fn failed(err: String) -> Self {
        Self { forest: None, digest: Digest::new(), diff: DiffStats::default(), db_mod_time: None, err: Some(err) }
    }
}

#[derive(Clone, Debug)]
pub enum Msg {
    // -- Clock --
    /// Periodic refresh probe.
    Tick,
    ErrorToastTick,
    CopyToastTick,
    StatusToastTick,
    LabelsToastTick,
    CreateToastTick,
    TitleFlashClear,
    TypeInferenceFlashClear,
    UpdateToastTick,

    // -- I/O completion --
    RefreshComplete(Box<RefreshCompletion>),
    StatusUpdateComplete { err: Option<String> },
    LabelUpdateComplete { err: Option<String> },
    CreateComplete { id: Option<String>, err: Option<String> },
    /// Completion of an edit-form submission (`UpdateBead`). Not named in the
    /// distilled taxonomy alongside `createCompleteMsg`/`statusUpdateCompleteMsg`,
    /// but the same error-toast-then-refresh path applies to it.
    BeadUpdateComplete { err: Option<String> },
    /// Completion of a delete (`Delete`, optionally cascading).
    DeleteComplete { err: Option<String> },
    /// Completion of `AddComment`.
    CommentAddComplete { err: Option<String> },
    CommentLoaded { issue_id: String, comments: Vec<Comment>, err: Option<String> },
    UpdateAvailable { info: String },

    // -- Overlay --
    StatusChanged(StatusChanged),
    StatusCancelled,
    LabelsUpdated(LabelsUpdated),
    LabelsCancelled,
    BeadCreated(FormSubmission),
    BeadUpdated(FormSubmission),
    CreateCancelled,
    DeleteConfirmed(DeleteConfirmed),
    DeleteCancelled,
    CommentAdded(CommentAdded),
    CommentCancelled,
    NewLabelAdded(String),
    NewAssigneeAdded(String),

    // -- Input --
    Key(KeyEvent),
    Resize(u16, u16),
}
