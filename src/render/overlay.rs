//! Splices the active overlay over the main body: clears its footprint with
//! [`Clear`] and draws it centered.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::eventcore::AppState;
use crate::overlays::{ActiveOverlay, ComboBox, ComboBoxState, MAX_VISIBLE};
use crate::model::{IssueType, Priority, Status};
use crate::theme::Theme;

fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width, height }
}

fn render_popup(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line<'static>>, theme: &Theme) {
    let popup = centered((area.width * 2 / 3).max(40), (lines.len() as u16 + 2).min(area.height), area);
    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.focused_border_style())
        .title(format!(" {title} "));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Appends `label: text[ghost]` and, when the dropdown is open, an indented
/// scroll window of filtered options with the highlighted one marked.
fn push_combo_field(lines: &mut Vec<Line<'static>>, label: &str, combo: &ComboBox, active: bool, theme: &Theme) {
    let caret_style = if active { theme.focused_style() } else { theme.normal_style() };
    let mut spans = vec![
        Span::styled(format!("{label}: "), caret_style),
        Span::raw(combo.text().to_string()),
    ];
    if let Some(ghost) = combo.ghost_suffix() {
        spans.push(Span::styled(ghost.to_string(), theme.placeholder_style()));
    }
    lines.push(Line::from(spans));

    if combo.state() == ComboBoxState::Idle {
        return;
    }
    let options = combo.filtered_options();
    let offset = combo.scroll_offset();
    let visible = options.iter().skip(offset).take(MAX_VISIBLE).enumerate();
    if combo.has_more_above() {
        lines.push(Line::from(Span::styled("  ▲", theme.placeholder_style())));
    }
    for (i, opt) in visible {
        let idx = offset + i;
        let marker = if idx == combo.highlight_index() { "▸ " } else { "  " };
        let style = if idx == combo.highlight_index() { theme.selected_style(true) } else { theme.normal_style() };
        lines.push(Line::from(Span::styled(format!("{marker}{opt}"), style)));
    }
    if combo.has_more_below() {
        lines.push(Line::from(Span::styled("  ▼", theme.placeholder_style())));
    }
}

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    match &state.active_overlay {
        ActiveOverlay::None => {}
        ActiveOverlay::Status(overlay) => {
            let current = overlay.highlighted();
            let lines: Vec<Line> = Status::ALL
                .iter()
                .map(|s| {
                    let marker = if *s == current { "▸ " } else { "  " };
                    let style = if *s == current { theme.selected_style(true) } else { theme.normal_style() };
                    Line::from(Span::styled(format!("{marker}{s}"), style))
                })
                .collect();
            render_popup(frame, area, "Change Status", lines, theme);
        }
        ActiveOverlay::Labels(overlay) => {
            let chip_box = overlay.chips();
            let mut lines = vec![Line::from(
                chip_box
                    .chips()
                    .iter()
                    .enumerate()
                    .map(|(i, chip)| {
                        let style = if chip_box.flash_index() == Some(i) {
                            theme.warning_style()
                        } else {
                            Style::default().fg(theme.accent())
                        };
                        Span::styled(format!("[{chip}] "), style)
                    })
                    .collect::<Vec<_>>(),
            )];
            push_combo_field(&mut lines, "add", chip_box.combo(), true, theme);
            render_popup(frame, area, "Edit Labels", lines, theme);
        }
        ActiveOverlay::Create(form) | ActiveOverlay::Edit(form) => {
            use crate::overlays::Zone;
            let mode_label = if matches!(state.active_overlay, ActiveOverlay::Create(_)) { "New Issue" } else { "Edit Issue" };
            let mut lines = Vec::new();
            push_combo_field(&mut lines, "parent", form.parent_combo(), form.zone() == Zone::Parent, theme);

            let title_style = if form.title_validation_error() {
                theme.error_style()
            } else if form.zone() == Zone::Title {
                theme.focused_style()
            } else {
                theme.normal_style()
            };
            lines.push(Line::from(vec![
                Span::styled("title: ", title_style),
                Span::raw(form.title().to_string()),
            ]));
            if form.title_validation_error() {
                lines.push(Line::from(Span::styled("title is required", theme.error_style())));
            }

            lines.push(Line::from(vec![
                Span::styled("description: ", if form.zone() == Zone::Description { theme.focused_style() } else { theme.normal_style() }),
                Span::raw(form.description().to_string()),
            ]));

            let type_style = if form.type_flash() {
                theme.warning_style()
            } else if form.zone() == Zone::Type {
                theme.focused_style()
            } else {
                theme.normal_style()
            };
            let types = IssueType::ALL
                .iter()
                .map(|t| {
                    let marker = if *t == form.issue_type() { format!("[{t}]") } else { t.to_string() };
                    Span::raw(format!("{marker} "))
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(std::iter::once(Span::styled("type: ", type_style)).chain(types).collect::<Vec<_>>()));

            let priority_style = if form.zone() == Zone::Priority { theme.focused_style() } else { theme.normal_style() };
            let priorities = [Priority::CRITICAL, Priority::HIGH, Priority::MEDIUM, Priority::LOW, Priority::BACKLOG]
                .iter()
                .map(|p| {
                    let marker = if *p == form.priority() { format!("[{}]", p.mnemonic()) } else { p.mnemonic().to_string() };
                    Span::raw(format!("{marker} "))
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(std::iter::once(Span::styled("priority: ", priority_style)).chain(priorities).collect::<Vec<_>>()));

            let chip_box = form.labels_chip_box();
            lines.push(Line::from(
                std::iter::once(Span::styled("labels: ", if form.zone() == Zone::Labels { theme.focused_style() } else { theme.normal_style() }))
                    .chain(chip_box.chips().iter().map(|c| Span::raw(format!("[{c}] "))))
                    .collect::<Vec<_>>(),
            ));
            if form.zone() == Zone::Labels {
                push_combo_field(&mut lines, "  +", chip_box.combo(), true, theme);
            }

            push_combo_field(&mut lines, "assignee", form.assignee_combo(), form.zone() == Zone::Assignee, theme);

            render_popup(frame, area, mode_label, lines, theme);
        }
        ActiveOverlay::Delete(overlay) => {
            let mut lines = vec![Line::from("Delete this issue?")];
            if overlay.has_dependents() {
                let marker = if overlay.cascade() { "[x]" } else { "[ ]" };
                lines.push(Line::from(format!("{marker} cascade to dependents (space to toggle)")));
            }
            lines.push(Line::from(Span::styled("enter confirm · esc cancel", theme.placeholder_style())));
            render_popup(frame, area, "Delete Issue", lines, theme);
        }
        ActiveOverlay::Comment(overlay) => {
            let lines = vec![
                Line::from(overlay.text().to_string()),
                Line::from(Span::styled("enter submit · esc cancel", theme.placeholder_style())),
            ];
            render_popup(frame, area, "Add Comment", lines, theme);
        }
    }
}
