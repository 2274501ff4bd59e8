//! The tree pane: one line per `TreeRow`, column mode or wrapped-title mode
//! depending on terminal width.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::eventcore::{AppState, Focus};
use crate::model::{IssueType, Status};
use crate::theme::Theme;
use crate::tree::{layout_mode, truncate_with_ellipsis, wrap_with_hanging_indent, LayoutMode, LABELS_MIN_WIDTH};

fn status_glyph(status: Status) -> &'static str {
    match status {
        Status::Open => "o",
        Status::InProgress => "~",
        Status::Closed => "x",
        Status::Blocked => "!",
        Status::Deferred => "d",
    }
}

fn status_color(theme: &Theme, status: Status, is_blocked: bool) -> Color {
    if is_blocked {
        return theme.warning;
    }
    match status {
        Status::Open => theme.info,
        Status::InProgress => theme.primary,
        Status::Closed => theme.success,
        Status::Blocked => theme.warning,
        Status::Deferred => theme.text_muted(),
    }
}

fn type_glyph(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Task => "T",
        IssueType::Feature => "F",
        IssueType::Bug => "B",
        IssueType::Epic => "E",
        IssueType::Chore => "C",
    }
}

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = state.focus == Focus::Tree && !state.search_active;
    let border_style = if focused { theme.focused_border_style() } else { theme.border_style() };
    let title = if state.projection.filter.is_active() {
        format!(" Tree — filter: {} ", state.projection.filter.text())
    } else {
        " Tree ".to_string()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mode = match state.column_mode {
        Some(true) => LayoutMode::Columns,
        Some(false) => LayoutMode::Wrapped,
        None => layout_mode(inner.width),
    };
    let rows = state.projection.rows();
    let cursor = state.projection.viewport.cursor;

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let node = state.forest.node(row.node);
            let issue = &node.issue;
            let expanded = state.projection.is_expanded(row.identity_key());
            let caret = if node.children.is_empty() {
                " "
            } else if expanded {
                "▾"
            } else {
                "▸"
            };
            let indent = "  ".repeat(row.depth);
            let glyph = status_glyph(issue.status);
            let color = status_color(theme, issue.status, node.is_blocked);

            let mut spans = vec![
                Span::raw(format!("{indent}{caret} ")),
                Span::styled(format!("[{glyph}]"), Style::default().fg(color)),
                Span::raw(" "),
            ];

            match mode {
                LayoutMode::Columns => {
                    spans.push(Span::styled(format!("{:<5}", type_glyph(issue.issue_type)), theme.normal_style()));
                    spans.push(Span::styled(
                        format!("{:<8}", issue.priority.label()),
                        Style::default().fg(theme.accent()),
                    ));
                    let budget = inner.width as usize;
                    let used = indent.len() + 2 + 4 + 1 + 5 + 8;
                    let title_width = budget.saturating_sub(used).max(8);
                    spans.push(Span::raw(truncate_with_ellipsis(&issue.title, title_width)));
                    if inner.width >= LABELS_MIN_WIDTH && !issue.labels.is_empty() {
                        spans.push(Span::styled(
                            format!("  #{}", issue.labels.join(",#")),
                            Style::default().fg(theme.text_muted()),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                }
                LayoutMode::Wrapped => {
                    let prefix_width = indent.len() + 4;
                    let lines = wrap_with_hanging_indent(
                        &" ".repeat(prefix_width),
                        &issue.title,
                        inner.width as usize,
                    );
                    let mut first_line_spans = spans;
                    first_line_spans.push(Span::raw(lines[0].clone()));
                    let mut out = vec![Line::from(first_line_spans)];
                    for extra in &lines[1..] {
                        out.push(Line::from(extra.clone()));
                    }
                    ListItem::new(out)
                }
            }
        })
        .collect();

    let mut list_state = ListState::default().with_selected(Some(cursor).filter(|_| !rows.is_empty()));
    *list_state.offset_mut() = state.projection.viewport.scroll_offset;

    let list = List::new(items).highlight_style(theme.selected_highlight_style(focused));
    frame.render_stateful_widget(list, inner, &mut list_state);
}
