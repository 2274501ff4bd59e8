//! The header band: title, aggregate stats, active filter label, the last
//! refresh delta, and a persistent update-available warning.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::eventcore::AppState;
use crate::theme::Theme;

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let stats = state.forest.statistics();
    let mut top = vec![
        Span::styled("Abacus", theme.focused_bold_style()),
        Span::raw("  "),
        Span::raw(format!(
            "Total {}  Ready {}  In Progress {}  Blocked {}  Closed {}",
            stats.total, stats.ready, stats.in_progress, stats.blocked, stats.closed
        )),
    ];
    if state.refresh.refresh_in_flight() {
        top.push(Span::styled("  refreshing…", theme.placeholder_style()));
    }
    if let Some(diff) = &state.last_refresh_stats {
        top.push(Span::styled(format!("  {diff}"), Style::default().fg(theme.secondary())));
    }

    let mut bottom = Vec::new();
    if state.projection.filter.is_active() {
        bottom.push(Span::styled(
            format!("filter: {}", state.projection.filter.text()),
            Style::default().fg(theme.accent()),
        ));
    }
    if let Some(err) = &state.last_error {
        if !bottom.is_empty() {
            bottom.push(Span::raw("  "));
        }
        bottom.push(Span::styled(format!("last error: {err}"), theme.error_style()));
    }
    if let Some(notice) = &state.version_notice {
        if !bottom.is_empty() {
            bottom.push(Span::raw("  "));
        }
        bottom.push(Span::styled(notice.clone(), theme.warning_style()));
    }

    let lines = vec![Line::from(top), Line::from(bottom)];
    frame.render_widget(Paragraph::new(lines), area);
}
