//! A filterable single-value picker: type to narrow, arrow keys to
//! highlight, Enter/Tab to commit.

/// Open/closed state of the dropdown portion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComboBoxState {
    /// Dropdown closed.
    Idle,
    /// Dropdown open, showing every option.
    Browsing,
    /// Dropdown open, showing options matching the typed text.
    Filtering,
}

/// Default number of visible rows in the dropdown.
pub const MAX_VISIBLE: usize = 5;

/// What happened when the user committed a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub value: String,
    pub is_new: bool,
}

/// Outcome of a keystroke/action applied to the combo box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComboBoxOutput {
    /// No externally visible effect (dropdown opened/closed/navigated).
    None,
    /// Enter selected a value; component stays focused.
    EnterSelected(Selection),
    /// Tab selected a value and the parent should advance focus.
    TabSelected(Selection),
}

/// A single-value combo box over a static option list, with optional
/// "allow new" behavior for free-text entry.
#[derive(Clone, Debug)]
pub struct ComboBox {
    options: Vec<String>,
    allow_new: bool,
    state: ComboBoxState,
    text: String,
    committed: String,
    filtered: Vec<usize>,
    highlight: usize,
    scroll_offset: usize,
}

impl ComboBox {
    pub fn new(options: Vec<String>, allow_new: bool) -> Self {
        Self {
            options,
            allow_new,
            state: ComboBoxState::Idle,
            text: String::new(),
            committed: String::new(),
            filtered: Vec::new(),
            highlight: 0,
            scroll_offset: 0,
        }
    }

    pub fn state(&self) -> ComboBoxState {
        self.state
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_open(&self) -> bool {
        self.state != ComboBoxState::Idle
    }

    /// Whether the typed text differs from the last committed value.
    pub fn is_dirty(&self) -> bool {
        self.text != self.committed
    }

    /// Options currently shown, in display order.
    pub fn filtered_options(&self) -> Vec<&str> {
        self.filtered.iter().map(|&i| self.options[i].as_str()).collect()
    }

    pub fn highlight_index(&self) -> usize {
        self.highlight
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn has_more_above(&self) -> bool {
        self.scroll_offset > 0
    }

    pub fn has_more_below(&self) -> bool {
        self.scroll_offset + MAX_VISIBLE < self.filtered.len()
    }

    /// The inline completion suffix rendered past the cursor while
    /// filtering, or `None` when nothing qualifies.
    pub fn ghost_suffix(&self) -> Option<&str> {
        if self.state != ComboBoxState::Filtering || self.text.is_empty() {
            return None;
        }
        let highlighted = self.filtered.get(self.highlight).map(|&i| self.options[i].as_str())?;
        if highlighted.len() <= self.text.len() {
            return None;
        }
        let prefix_matches = highlighted[..self.text.len()].eq_ignore_ascii_case(&self.text);
        prefix_matches.then(|| &highlighted[self.text.len()..])
    }

    pub fn down_from_idle(&mut self) {
        if self.state == ComboBoxState::Idle {
            self.filtered = (0..self.options.len()).collect();
            self.state = ComboBoxState::Browsing;
            self.highlight = self
                .options
                .iter()
                .position(|o| o == &self.committed)
                .unwrap_or(0);
            self.reconcile_scroll();
        }
    }

    pub fn insert(&mut self, c: char) {
        self.text.push(c);
        self.refilter();
    }

    /// Backspace rejects a pending ghost-text autocomplete by clearing the
    /// highlight first, per spec.
    pub fn backspace(&mut self) {
        self.text.pop();
        self.refilter();
    }

    fn refilter(&mut self) {
        self.state = ComboBoxState::Filtering;
        let needle = self.text.to_lowercase();
        self.filtered = self
            .options
            .iter()
            .enumerate()
            .filter(|(_, o)| o.to_lowercase().contains(&needle))
            .map(|(i, _)| i)
            .collect();

        self.highlight = self
            .filtered
            .iter()
            .position(|&i| self.options[i].eq_ignore_ascii_case(&self.text))
            .unwrap_or(0);
        self.scroll_offset = 0;
        self.reconcile_scroll();
    }

    pub fn move_up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.highlight = self.highlight.saturating_sub(1);
        self.reconcile_scroll();
    }

    pub fn move_down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        self.highlight = (self.highlight + 1).min(self.filtered.len() - 1);
        self.reconcile_scroll();
    }

    fn reconcile_scroll(&mut self) {
        if self.highlight < self.scroll_offset {
            self.scroll_offset = self.highlight;
        }
        let last_visible = self.scroll_offset + MAX_VISIBLE.saturating_sub(1);
        if self.highlight > last_visible {
            self.scroll_offset = self.highlight + 1 - MAX_VISIBLE;
        }
        let max_offset = self.filtered.len().saturating_sub(MAX_VISIBLE);
        if self.scroll_offset > max_offset {
            self.scroll_offset = max_offset;
        }
    }

    fn current_selection(&self) -> Option<Selection> {
        if let Some(&i) = self.filtered.get(self.highlight) {
            return Some(Selection { value: self.options[i].clone(), is_new: false });
        }
        if self.allow_new && !self.text.trim().is_empty() {
            return Some(Selection { value: self.text.clone(), is_new: true });
        }
        None
    }

    fn commit(&mut self, selection: &Selection) {
        self.committed = selection.value.clone();
        self.text = selection.value.clone();
        self.state = ComboBoxState::Idle;
        if selection.is_new && !self.options.iter().any(|o| o == &selection.value) {
            self.options.push(selection.value.clone());
        }
    }

    pub fn enter(&mut self) -> ComboBoxOutput {
        match self.current_selection() {
            Some(selection) => {
                self.commit(&selection);
                ComboBoxOutput::EnterSelected(selection)
            }
            None => ComboBoxOutput::None,
        }
    }

    pub fn tab(&mut self) -> ComboBoxOutput {
        match self.current_selection() {
            Some(selection) => {
                self.commit(&selection);
                ComboBoxOutput::TabSelected(selection)
            }
            None => ComboBoxOutput::None,
        }
    }

    /// First stage closes the dropdown keeping typed text; second stage
    /// reverts to the committed value.
    pub fn escape(&mut self) {
        if self.state != ComboBoxState::Idle {
            self.state = ComboBoxState::Idle;
        } else if self.text != self.committed {
            self.text = self.committed.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combo() -> ComboBox {
        ComboBox::new(vec!["build".into(), "UI".into(), "ui-redesign".into()], false)
    }

    #[test]
    fn typing_ui_filters_and_highlights_exact_match() {
        let mut c = combo();
        c.insert('u');
        c.insert('i');
        assert_eq!(c.filtered_options(), vec!["build", "UI", "ui-redesign"]);
        assert_eq!(c.filtered_options()[c.highlight_index()], "UI");
    }

    #[test]
    fn ghost_suffix_present_when_highlight_extends_prefix() {
        let mut c = combo();
        c.insert('u');
        let suffix = c.ghost_suffix().unwrap().to_string();
        assert!("I".eq_ignore_ascii_case(&suffix) || suffix.to_lowercase().starts_with('i'));
    }

    #[test]
    fn enter_commits_highlighted_value() {
        let mut c = combo();
        c.insert('u');
        c.insert('i');
        let out = c.enter();
        assert_eq!(out, ComboBoxOutput::EnterSelected(Selection { value: "UI".into(), is_new: false }));
        assert_eq!(c.state(), ComboBoxState::Idle);
    }

    #[test]
    fn allow_new_creates_value_with_no_match() {
        let mut c = ComboBox::new(vec!["build".into()], true);
        for ch in "nobody".chars() {
            c.insert(ch);
        }
        let out = c.tab();
        assert_eq!(out, ComboBoxOutput::TabSelected(Selection { value: "nobody".into(), is_new: true }));
    }

    #[test]
    fn scroll_window_keeps_highlight_visible() {
        let options: Vec<String> = (0..20).map(|i| format!("opt{i}")).collect();
        let mut c = ComboBox::new(options, false);
        c.down_from_idle();
        for _ in 0..12 {
            c.move_down();
        }
        assert!(c.scroll_offset() <= c.highlight_index());
        assert!(c.highlight_index() < c.scroll_offset() + MAX_VISIBLE);
    }
}
