//! The view half of the `update`/`view` pair: lays out header, body, and
//! footer bands, then splices the active overlay and any toasts on top.
//! Ratatui renders immediate-mode, so "splicing" is simply drawing later in
//! the same frame over a [`ratatui::widgets::Clear`]d footprint.

mod detail;
mod footer;
mod header;
mod overlay;
mod toast;
mod tree;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::eventcore::{AppState, Focus};
use crate::tree::{layout_mode, LayoutMode};

pub fn view(state: &AppState, frame: &mut Frame) {
    let theme = state.theme.clone();
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3), Constraint::Length(1)])
        .areas(area);

    header::view(state, frame, header_area, &theme);
    footer::view(state, frame, footer_area, &theme);

    let mode = match state.column_mode {
        Some(true) => LayoutMode::Columns,
        Some(false) => LayoutMode::Wrapped,
        None => layout_mode(body_area.width),
    };
    match mode {
        LayoutMode::Columns if state.focus == Focus::Details || detail_pane_wanted(state) => {
            let [tree_area, detail_area] = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
                .areas(body_area);
            tree::view(state, frame, tree_area, &theme);
            detail::view(state, frame, detail_area, &theme);
        }
        _ => tree::view(state, frame, body_area, &theme),
    }

    overlay::view(state, frame, area, &theme);
    toast::view(state, frame, area, &theme);
}

/// The detail pane is worth the screen real estate whenever there's a row
/// under the cursor to show, not only while it holds input focus.
fn detail_pane_wanted(state: &AppState) -> bool {
    !state.projection.rows().is_empty()
}
