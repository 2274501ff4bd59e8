//! Toast extraction and rendering. Error messages are squeezed down to a
//! single readable line before display; the other toasts are already short,
//! user-authored strings and pass through unchanged.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::eventcore::AppState;
use crate::theme::Theme;

const MAX_TOAST_LEN: usize = 80;

/// Strips a leading "Error:" prefix, keeps only the first line/sentence,
/// drops a trailing "Run 'bd ...'" suggestion, and clamps to 80 chars.
pub fn extract_toast_text(raw: &str) -> String {
    let mut text = raw.trim();
    for prefix in ["Error: ", "error: ", "Error:", "error:"] {
        if let Some(rest) = text.strip_prefix(prefix) {
            text = rest.trim();
            break;
        }
    }

    let first_line = text.lines().next().unwrap_or("");
    let first_sentence = first_line.split(". ").next().unwrap_or(first_line);

    let without_suggestion = match first_sentence.find("Run '") {
        Some(idx) => first_sentence[..idx].trim_end(),
        None => first_sentence,
    };

    if without_suggestion.chars().count() <= MAX_TOAST_LEN {
        without_suggestion.to_string()
    } else {
        let truncated: String = without_suggestion.chars().take(MAX_TOAST_LEN.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}

struct ToastLine {
    text: String,
    style: Style,
}

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let mut toasts = Vec::new();
    if let Some(raw) = &state.error_toast {
        toasts.push(ToastLine { text: extract_toast_text(raw), style: theme.error_style() });
    }
    if let Some(msg) = &state.status_toast {
        toasts.push(ToastLine { text: msg.clone(), style: theme.success_style() });
    }
    if let Some(msg) = &state.labels_toast {
        toasts.push(ToastLine { text: msg.clone(), style: theme.success_style() });
    }
    if let Some(msg) = &state.create_toast {
        toasts.push(ToastLine { text: msg.clone(), style: theme.success_style() });
    }
    if let Some(msg) = &state.update_toast {
        toasts.push(ToastLine { text: msg.clone(), style: theme.success_style() });
    }
    if let Some(msg) = &state.copy_toast {
        toasts.push(ToastLine { text: msg.clone(), style: theme.info_style() });
    }
    if toasts.is_empty() {
        return;
    }

    let width = toasts.iter().map(|t| t.text.chars().count()).max().unwrap_or(0) as u16 + 4;
    let width = width.min(area.width.saturating_sub(2)).max(10);
    let height = toasts.len() as u16 + 2;

    let [v] = Layout::vertical([Constraint::Length(height)]).flex(Flex::End).areas(area);
    let [toast_area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::End).areas(v);

    frame.render_widget(Clear, toast_area);
    let block = Block::default().borders(Borders::ALL).border_style(theme.border_style());
    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let lines: Vec<Line> = toasts.into_iter().map(|t| Line::from(Span::styled(t.text, t.style))).collect();
    frame.render_widget(Paragraph::new(lines), inner);
}
