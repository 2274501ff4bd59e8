//! The shared 6-zone form behind CreateOverlay and EditOverlay: PARENT,
//! TITLE, TYPE, PRIORITY, LABELS, ASSIGNEE (plus an unlisted DESCRIPTION
//! zone the Tab cycle visits between Title and Type).

use std::time::Instant;

use crate::model::{IssueType, Priority};

use super::chip_combobox::ChipComboBox;
use super::combobox::{ComboBox, ComboBoxOutput};
use super::type_inference::infer_type;

/// Whether the form knows if it's creating a root issue, a child of a known
/// parent, or hasn't been told yet — kept explicit rather than inferred
/// from the presence of a default parent id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RootMode {
    Unknown,
    Root,
    Child,
}

/// Whether the form is creating a new issue or editing an existing one;
/// edit mode skips the Type zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Zone {
    Parent,
    Title,
    Description,
    Type,
    Priority,
    Labels,
    Assignee,
}

/// What closing the form (Escape or submit) produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormOutcome {
    /// A dropdown was closed; the form stays open.
    DroppedDropdown,
    /// A combo's text reverted to its committed value; the form stays open.
    RevertedInput,
    /// The form was cancelled outright.
    Cancelled,
}

/// The confirmed field values on submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub issue_id: Option<String>,
    pub parent_id: Option<String>,
    pub title: String,
    pub description: String,
    pub issue_type: IssueType,
    pub priority: Priority,
    pub labels: Vec<String>,
    pub assignee: Option<String>,
}

pub struct CreateEditOverlay {
    mode: FormMode,
    issue_id: Option<String>,
    root_mode: RootMode,
    zone: Zone,
    parent: ComboBox,
    title: String,
    description: String,
    type_index: usize,
    type_manually_set: bool,
    type_flash: bool,
    priority_index: usize,
    labels: ChipComboBox,
    assignee: ComboBox,
    title_validation_error: bool,
}

const PRIORITIES: [Priority; 5] =
    [Priority::CRITICAL, Priority::HIGH, Priority::MEDIUM, Priority::LOW, Priority::BACKLOG];

impl CreateEditOverlay {
    pub fn new_create(parents: Vec<String>, known_labels: Vec<String>, known_assignees: Vec<String>) -> Self {
        Self {
            mode: FormMode::Create,
            issue_id: None,
            root_mode: RootMode::Unknown,
            zone: Zone::Title,
            parent: ComboBox::new(parents, false),
            title: String::new(),
            description: String::new(),
            type_index: 0,
            type_manually_set: false,
            type_flash: false,
            priority_index: 2,
            labels: ChipComboBox::new(known_labels),
            assignee: ComboBox::new(known_assignees, true),
            title_validation_error: false,
        }
    }

    pub fn new_edit(
        issue_id: String,
        title: String,
        description: String,
        issue_type: IssueType,
        priority: Priority,
        labels: Vec<String>,
        known_labels: Vec<String>,
        assignee: Option<String>,
        known_assignees: Vec<String>,
    ) -> Self {
        let mut chips = ChipComboBox::new(known_labels);
        for label in &labels {
            chips.seed_chip(label.clone());
        }
        let mut assignee_combo = ComboBox::new(known_assignees, true);
        if let Some(a) = &assignee {
            for ch in a.chars() {
                assignee_combo.insert(ch);
            }
            let _ = assignee_combo.enter();
        }
        Self {
            mode: FormMode::Edit,
            issue_id: Some(issue_id),
            root_mode: RootMode::Unknown,
            zone: Zone::Title,
            parent: ComboBox::new(vec![], false),
            title,
            description,
            type_index: IssueType::ALL.iter().position(|t| *t == issue_type).unwrap_or(0),
            type_manually_set: true,
            type_flash: false,
            priority_index: PRIORITIES.iter().position(|p| *p == priority).unwrap_or(2),
            labels: chips,
            assignee: assignee_combo,
            title_validation_error: false,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn parent_combo(&self) -> &ComboBox {
        &self.parent
    }

    pub fn labels_chip_box(&self) -> &ChipComboBox {
        &self.labels
    }

    pub fn assignee_combo(&self) -> &ComboBox {
        &self.assignee
    }

    pub fn root_mode(&self) -> RootMode {
        self.root_mode
    }

    pub fn set_root_mode(&mut self, mode: RootMode) {
        self.root_mode = mode;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn issue_type(&self) -> IssueType {
        IssueType::ALL[self.type_index]
    }

    pub fn priority(&self) -> Priority {
        PRIORITIES[self.priority_index]
    }

    pub fn type_flash(&self) -> bool {
        self.type_flash
    }

    pub fn clear_type_flash(&mut self) {
        self.type_flash = false;
    }

    pub fn title_validation_error(&self) -> bool {
        self.title_validation_error
    }

    pub fn clear_title_validation_error(&mut self) {
        self.title_validation_error = false;
    }

    /// Title input is a newline-suppressing single-line textarea: any
    /// Enter submits rather than inserting a line break.
    pub fn set_title(&mut self, title: String) {
        self.title = title;
        if !self.type_manually_set {
            if let Some(inferred) = infer_type(&self.title) {
                let idx = IssueType::ALL.iter().position(|t| *t == inferred).unwrap_or(self.type_index);
                if idx != self.type_index {
                    self.type_index = idx;
                    self.type_flash = true;
                }
            }
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: String) {
        self.description = description;
    }

    fn forward_zones(&self) -> &'static [Zone] {
        match self.mode {
            FormMode::Create => {
                &[Zone::Title, Zone::Description, Zone::Type, Zone::Priority, Zone::Labels, Zone::Assignee]
            }
            FormMode::Edit => &[Zone::Title, Zone::Description, Zone::Priority, Zone::Labels, Zone::Assignee],
        }
    }

    pub fn tab(&mut self) {
        let zones = self.forward_zones();
        let idx = zones.iter().position(|z| *z == self.zone).unwrap_or(0);
        self.zone = zones[(idx + 1) % zones.len()];
    }

    /// Reverses the Tab cycle; from Title it goes to Parent instead of
    /// wrapping to the cycle's tail.
    pub fn shift_tab(&mut self) {
        if self.zone == Zone::Title {
            self.zone = Zone::Parent;
            return;
        }
        if self.zone == Zone::Parent {
            self.zone = Zone::Title;
            return;
        }
        let zones = self.forward_zones();
        let idx = zones.iter().position(|z| *z == self.zone).unwrap_or(0);
        self.zone = zones[(idx + zones.len() - 1) % zones.len()];
    }

    /// Left/Right (or h/l) inside the Type zone; marks the type as
    /// manually chosen, disabling further inference.
    pub fn type_move(&mut self, delta: isize) {
        let len = IssueType::ALL.len() as isize;
        let next = (self.type_index as isize + delta).rem_euclid(len);
        self.type_index = next as usize;
        self.type_manually_set = true;
    }

    /// Jumps straight to a priority by its mnemonic letter (c/h/m/l/b).
    pub fn priority_jump_mnemonic(&mut self, mnemonic: char) {
        if let Some(idx) = PRIORITIES.iter().position(|p| p.mnemonic() == mnemonic) {
            self.priority_index = idx;
        }
    }

    pub fn priority_move(&mut self, delta: isize) {
        let len = PRIORITIES.len() as isize;
        let next = (self.priority_index as isize + delta).rem_euclid(len);
        self.priority_index = next as usize;
    }

    /// Two-stage escape: closes an open dropdown first; then reverts a
    /// combo's text if it differs from its committed value; otherwise
    /// cancels the whole form.
    pub fn escape(&mut self) -> FormOutcome {
        if self.parent.is_open() || self.labels.combo().is_open() || self.assignee.is_open() {
            self.parent.escape();
            self.labels.combo_mut().escape();
            self.assignee.escape();
            return FormOutcome::DroppedDropdown;
        }
        if self.assignee.is_dirty() || self.labels.combo().is_dirty() || self.parent.is_dirty() {
            self.assignee.escape();
            self.labels.combo_mut().escape();
            self.parent.escape();
            return FormOutcome::RevertedInput;
        }
        FormOutcome::Cancelled
    }

    pub fn labels_insert(&mut self, c: char) {
        self.labels.combo_mut().insert(c);
    }

    pub fn labels_backspace(&mut self) {
        self.labels.backspace();
    }

    pub fn labels_enter(&mut self, now: Instant) {
        self.labels.enter(now);
    }

    pub fn labels_tab(&mut self, now: Instant) {
        self.labels.tab(now);
    }

    pub fn labels_down_from_idle(&mut self) {
        self.labels.combo_mut().down_from_idle();
    }

    pub fn labels_move_up(&mut self) {
        self.labels.combo_mut().move_up();
    }

    pub fn labels_move_down(&mut self) {
        self.labels.combo_mut().move_down();
    }

    pub fn parent_is_open(&self) -> bool {
        self.parent.is_open()
    }

    pub fn labels_is_open(&self) -> bool {
        self.labels.combo().is_open()
    }

    pub fn assignee_is_open(&self) -> bool {
        self.assignee.is_open()
    }

    pub fn parent_insert(&mut self, c: char) {
        self.parent.insert(c);
    }

    pub fn parent_backspace(&mut self) {
        self.parent.backspace();
    }

    pub fn parent_down_from_idle(&mut self) {
        self.parent.down_from_idle();
    }

    pub fn parent_move_up(&mut self) {
        self.parent.move_up();
    }

    pub fn parent_move_down(&mut self) {
        self.parent.move_down();
    }

    pub fn parent_enter(&mut self) {
        let _ = self.parent.enter();
    }

    pub fn assignee_insert(&mut self, c: char) {
        self.assignee.insert(c);
    }

    pub fn assignee_backspace(&mut self) {
        self.assignee.backspace();
    }

    pub fn assignee_down_from_idle(&mut self) {
        self.assignee.down_from_idle();
    }

    pub fn assignee_move_up(&mut self) {
        self.assignee.move_up();
    }

    pub fn assignee_move_down(&mut self) {
        self.assignee.move_down();
    }

    /// Commits the highlighted/typed assignee; returns the value if it is
    /// newly introduced so the caller can add it to the known-assignees list.
    pub fn assignee_enter(&mut self) -> Option<String> {
        match self.assignee.enter() {
            ComboBoxOutput::EnterSelected(sel) if sel.is_new => Some(sel.value),
            _ => None,
        }
    }

    /// Submitting with an empty/whitespace-only title sets the validation
    /// flash and refuses to emit a submission.
    pub fn submit(&mut self) -> Option<FormSubmission> {
        if self.title.trim().is_empty() {
            self.title_validation_error = true;
            return None;
        }
        let assignee = {
            let text = self.assignee.text().trim();
            (!text.is_empty()).then(|| text.to_string())
        };
        Some(FormSubmission {
            issue_id: self.issue_id.clone(),
            parent_id: {
                let text = self.parent.text().trim();
                (!text.is_empty()).then(|| text.to_string())
            },
            title: self.title.clone(),
            description: self.description.clone(),
            issue_type: self.issue_type(),
            priority: self.priority(),
            labels: self.labels.chips().to_vec(),
            assignee,
        })
    }
}
