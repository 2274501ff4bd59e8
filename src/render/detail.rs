//! The detail pane: markdown-rendered description/design/acceptance fields
//! for the issue under the cursor, plus metadata and the comment thread.

use pulldown_cmark::{Event as MdEvent, HeadingLevel, Parser, Tag, TagEnd};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::eventcore::{AppState, Focus};
use crate::model::Node;
use crate::theme::Theme;
use crate::tree::format_relative_time;

/// Renders `source` as a flat sequence of styled lines; headings get bold,
/// code spans get the muted color, everything else is plain text joined on
/// paragraph/softbreak boundaries.
fn render_markdown(source: &str, theme: &Theme) -> Vec<Line<'static>> {
    if source.trim().is_empty() {
        return vec![Line::from(Span::styled("(none)", theme.placeholder_style()))];
    }

    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut bold = false;
    let mut code = false;

    let flush = |current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>| {
        if !current.is_empty() {
            lines.push(Line::from(std::mem::take(current)));
        }
    };

    for event in Parser::new(source) {
        match event {
            MdEvent::Start(Tag::Heading { level, .. }) => {
                flush(&mut current, &mut lines);
                let marker = "#".repeat(match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                });
                current.push(Span::styled(format!("{marker} "), theme.focused_bold_style()));
                bold = true;
            }
            MdEvent::End(TagEnd::Heading(_)) => {
                bold = false;
                flush(&mut current, &mut lines);
            }
            MdEvent::Start(Tag::Strong) => bold = true,
            MdEvent::End(TagEnd::Strong) => bold = false,
            MdEvent::Code(text) => {
                current.push(Span::styled(text.to_string(), Style::default().fg(theme.accent())));
            }
            MdEvent::Start(Tag::CodeBlock(_)) => code = true,
            MdEvent::End(TagEnd::CodeBlock) => {
                code = false;
                flush(&mut current, &mut lines);
            }
            MdEvent::Start(Tag::Item) => {
                flush(&mut current, &mut lines);
                current.push(Span::raw("• "));
            }
            MdEvent::End(TagEnd::Item) => flush(&mut current, &mut lines),
            MdEvent::Start(Tag::Paragraph) => {}
            MdEvent::End(TagEnd::Paragraph) => flush(&mut current, &mut lines),
            MdEvent::SoftBreak | MdEvent::HardBreak => {
                current.push(Span::raw(" "));
            }
            MdEvent::Text(text) => {
                let style = if code {
                    Style::default().fg(theme.text_muted())
                } else if bold {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                current.push(Span::styled(text.to_string(), style));
            }
            _ => {}
        }
    }
    flush(&mut current, &mut lines);
    if lines.is_empty() {
        lines.push(Line::from(""));
    }
    lines
}

fn field_section(title: &str, body: &str, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = vec![Line::from(Span::styled(title.to_string(), theme.focused_bold_style()))];
    out.extend(render_markdown(body, theme));
    out.push(Line::from(""));
    out
}

fn comments_section(node: &Node, theme: &Theme) -> Vec<Line<'static>> {
    let mut out = vec![Line::from(Span::styled("Comments", theme.focused_bold_style()))];
    if let Some(err) = &node.comment_error {
        out.push(Line::from(Span::styled(
            format!("failed to load: {err} (press c to retry)"),
            theme.error_style(),
        )));
        return out;
    }
    if !node.comments_loaded {
        out.push(Line::from(Span::styled("loading…", theme.placeholder_style())));
        return out;
    }
    if node.issue.comments.is_empty() {
        out.push(Line::from(Span::styled("(no comments)", theme.placeholder_style())));
        return out;
    }
    let now = chrono::Utc::now();
    for comment in &node.issue.comments {
        out.push(Line::from(vec![
            Span::styled(comment.author.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(
                format_relative_time(Some(comment.created_at), now),
                theme.placeholder_style(),
            ),
        ]));
        out.push(Line::from(comment.text.clone()));
        out.push(Line::from(""));
    }
    out
}

pub fn view(state: &AppState, frame: &mut Frame, area: Rect, theme: &Theme) {
    let focused = state.focus == Focus::Details;
    let border_style = if focused { theme.focused_border_style() } else { theme.border_style() };

    let Some(row) = state.projection.rows().get(state.projection.viewport.cursor) else {
        let block = Block::default().borders(Borders::ALL).border_style(border_style).title(" Details ");
        frame.render_widget(Paragraph::new("No issue selected").block(block), area);
        return;
    };
    let node = state.forest.node(row.node);
    let issue = &node.issue;

    let title = format!(" {} — {} ", issue.id, issue.title);
    let block = Block::default().borders(Borders::ALL).border_style(border_style).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{:?}", issue.status), theme.info_style()),
        Span::raw("  "),
        Span::styled(issue.priority.label(), Style::default().fg(theme.accent())),
        Span::raw("  "),
        Span::styled(format!("{:?}", issue.issue_type), theme.normal_style()),
    ])];
    if let Some(assignee) = &issue.assignee {
        lines.push(Line::from(format!("assignee: {assignee}")));
    }
    if !issue.labels.is_empty() {
        lines.push(Line::from(format!("labels: {}", issue.labels.join(", "))));
    }
    if node.is_blocked {
        lines.push(Line::from(Span::styled("blocked", theme.warning_style())));
    }
    lines.push(Line::from(""));

    lines.extend(field_section("Description", &issue.description, theme));
    lines.extend(field_section("Design", &issue.design, theme));
    lines.extend(field_section("Acceptance Criteria", &issue.acceptance, theme));
    lines.extend(comments_section(node, theme));

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
