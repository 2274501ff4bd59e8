//! The bottom bar: either the key-hint footer or the live search input.

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::eventcore::AppState;
use crate::theme::Theme;

const HINTS: &str = "j/k move  enter/space toggle  tab focus  / search  s status  L labels  n new  \
E edit  x delete  m comment  r refresh  e last error  q quit";

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    if state.search_active {
        let line = Line::from(vec![
            Span::styled("/", Style::default().fg(theme.accent())),
            Span::raw(state.search_text.as_str()),
            Span::styled("█", theme.placeholder_style()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    } else {
        frame.render_widget(Paragraph::new(Span::styled(HINTS, theme.placeholder_style())), area);
    }
}
