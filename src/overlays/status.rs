//! Lists status options for the focused issue; Enter confirms, Esc cancels.

use crate::model::Status;

/// Result of confirming the status overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusChanged {
    pub issue_id: String,
    pub new_status: Status,
}

#[derive(Clone, Debug)]
pub struct StatusOverlay {
    issue_id: String,
    highlighted: usize,
}

impl StatusOverlay {
    pub fn new(issue_id: String, current: Status) -> Self {
        let highlighted = Status::ALL.iter().position(|s| *s == current).unwrap_or(0);
        Self { issue_id, highlighted }
    }

    pub fn highlighted(&self) -> Status {
        Status::ALL[self.highlighted]
    }

    pub fn move_up(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        self.highlighted = (self.highlighted + 1).min(Status::ALL.len() - 1);
    }

    pub fn confirm(&self) -> StatusChanged {
        StatusChanged { issue_id: self.issue_id.clone(), new_status: self.highlighted() }
    }
}
