//! Chip-based label editor: existing labels start as chips, new ones are
//! typed in, backspace at a chip boundary deletes the last chip.

use std::time::Instant;

use super::chip_combobox::ChipComboBox;

/// Confirmed label delta; the core applies adds before removes, serially.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LabelsUpdated {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct LabelsOverlay {
    issue_id: String,
    original: Vec<String>,
    chips: ChipComboBox,
}

impl LabelsOverlay {
    pub fn new(issue_id: String, existing_labels: Vec<String>, known_labels: Vec<String>) -> Self {
        let mut chips = ChipComboBox::new(known_labels);
        for label in &existing_labels {
            chips.seed_chip(label.clone());
        }
        Self { issue_id, original: existing_labels, chips }
    }

    pub fn issue_id(&self) -> &str {
        &self.issue_id
    }

    pub fn chips(&self) -> &ChipComboBox {
        &self.chips
    }

    pub fn chips_mut(&mut self) -> &mut ChipComboBox {
        &mut self.chips
    }

    pub fn insert(&mut self, c: char) {
        self.chips.combo_mut().insert(c);
    }

    pub fn backspace(&mut self) {
        self.chips.backspace();
    }

    pub fn enter(&mut self, now: Instant) {
        self.chips.enter(now);
    }

    pub fn confirm(&self) -> LabelsUpdated {
        let current: Vec<&String> = self.chips.chips().iter().collect();
        let added = current
            .iter()
            .filter(|c| !self.original.iter().any(|o| o == **c))
            .map(|c| (*c).clone())
            .collect();
        let removed = self
            .original
            .iter()
            .filter(|o| !current.iter().any(|c| *c == *o))
            .cloned()
            .collect();
        LabelsUpdated { added, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_change_yields_empty_delta() {
        let overlay = LabelsOverlay::new("ab-1".into(), vec!["ui".into()], vec!["ui".into(), "backend".into()]);
        assert_eq!(overlay.confirm(), LabelsUpdated::default());
    }

    #[test]
    fn added_and_removed_are_computed_against_the_original_set() {
        let mut overlay = LabelsOverlay::new("ab-1".into(), vec!["ui".into()], vec!["ui".into(), "backend".into()]);
        overlay.chips_mut().remove_chip("ui");
        for ch in "backend".chars() {
            overlay.insert(ch);
        }
        overlay.enter(Instant::now());
        let delta = overlay.confirm();
        assert_eq!(delta.added, vec!["backend".to_string()]);
        assert_eq!(delta.removed, vec!["ui".to_string()]);
    }
}
