//! The modal overlay family: a single-slot stack holding at most one of
//! Status/Labels/Create/Edit/Delete/Comment at a time.

mod chip_combobox;
mod combobox;
mod comment;
mod create_edit;
mod delete;
mod labels;
mod status;
mod type_inference;

pub use chip_combobox::{ChipComboBox, ChipComboBoxOutput};
pub use combobox::{ComboBox, ComboBoxOutput, ComboBoxState, Selection, MAX_VISIBLE};
pub use comment::{CommentAdded, CommentOverlay};
pub use create_edit::{CreateEditOverlay, FormMode, FormOutcome, FormSubmission, RootMode, Zone};
pub use delete::{DeleteConfirmed, DeleteOverlay};
pub use labels::{LabelsOverlay, LabelsUpdated};
pub use status::{StatusChanged, StatusOverlay};
pub use type_inference::infer_type;

/// The currently active modal, if any. Only one can be open at a time;
/// opening a new one replaces whatever was there.
pub enum ActiveOverlay {
    None,
    Status(StatusOverlay),
    Labels(LabelsOverlay),
    Create(CreateEditOverlay),
    Edit(CreateEditOverlay),
    Delete(DeleteOverlay),
    Comment(CommentOverlay),
}

impl Default for ActiveOverlay {
    fn default() -> Self {
        ActiveOverlay::None
    }
}

impl ActiveOverlay {
    pub fn is_none(&self) -> bool {
        matches!(self, ActiveOverlay::None)
    }

    pub fn close(&mut self) {
        *self = ActiveOverlay::None;
    }
}
