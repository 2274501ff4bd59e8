//! A [`ComboBox`] that accumulates selections as chips (used for labels).

use std::time::Instant;

use super::combobox::{ComboBox, ComboBoxOutput};

/// Result of feeding a keystroke to the chip combo.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChipComboBoxOutput {
    None,
    /// A chip was added (or a duplicate flashed); stays focused.
    Handled,
    /// Tab with no pending commit: parent should advance focus.
    Advance,
}

/// Wraps [`ComboBox`] with a chip list and duplicate-flash feedback.
#[derive(Clone, Debug)]
pub struct ChipComboBox {
    combo: ComboBox,
    chips: Vec<String>,
    /// Index of a chip that just received a duplicate-add attempt, and when
    /// that flash should clear (~300ms, enforced by the caller's clock).
    flash: Option<(usize, Instant)>,
}

impl ChipComboBox {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            combo: ComboBox::new(options, true),
            chips: Vec::new(),
            flash: None,
        }
    }

    pub fn combo(&self) -> &ComboBox {
        &self.combo
    }

    pub fn combo_mut(&mut self) -> &mut ComboBox {
        &mut self.combo
    }

    pub fn chips(&self) -> &[String] {
        &self.chips
    }

    /// Seeds an initial chip (e.g. an issue's existing labels) without
    /// going through the duplicate-flash path.
    pub fn seed_chip(&mut self, value: String) {
        self.chips.push(value);
    }

    pub fn remove_chip(&mut self, value: &str) {
        self.chips.retain(|c| c != value);
    }

    pub fn flash_index(&self) -> Option<usize> {
        self.flash.map(|(i, _)| i)
    }

    pub fn clear_flash(&mut self) {
        self.flash = None;
    }

    fn add_chip(&mut self, value: String, now: Instant) -> ChipComboBoxOutput {
        if let Some(idx) = self.chips.iter().position(|c| c == &value) {
            self.flash = Some((idx, now));
            ChipComboBoxOutput::Handled
        } else {
            self.chips.push(value);
            ChipComboBoxOutput::Handled
        }
    }

    /// Backspace at an empty input boundary removes the last chip instead
    /// of being forwarded to the text field.
    pub fn backspace(&mut self) {
        if self.combo.text().is_empty() {
            self.chips.pop();
        } else {
            self.combo.backspace();
        }
    }

    pub fn enter(&mut self, now: Instant) -> ChipComboBoxOutput {
        match self.combo.enter() {
            ComboBoxOutput::EnterSelected(sel) => self.add_chip(sel.value, now),
            ComboBoxOutput::TabSelected(_) => unreachable!("enter() never returns TabSelected"),
            ComboBoxOutput::None => ChipComboBoxOutput::None,
        }
    }

    /// Tab with empty text but existing raw input commits the raw input as
    /// a chip first; otherwise it's an advance signal for the parent form.
    pub fn tab(&mut self, now: Instant) -> ChipComboBoxOutput {
        match self.combo.tab() {
            ComboBoxOutput::TabSelected(sel) => self.add_chip(sel.value, now),
            ComboBoxOutput::EnterSelected(_) => unreachable!("tab() never returns EnterSelected"),
            ComboBoxOutput::None => ChipComboBoxOutput::Advance,
        }
    }
}
