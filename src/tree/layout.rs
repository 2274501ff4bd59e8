//! Width-dependent tree rendering decisions: column mode thresholds, title
//! wrapping with a hanging indent, ellipsis truncation, relative time.

use chrono::{DateTime, Datelike, Utc};
use unicode_width::UnicodeWidthStr;

/// Below this width the tree view drops the status/priority columns and
/// wraps titles instead of truncating them.
pub const COLUMN_MODE_MIN_WIDTH: u16 = 100;

/// Minimum width at which labels are still shown inline.
pub const LABELS_MIN_WIDTH: u16 = 140;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Full columns: tree, status, priority, labels.
    Columns,
    /// Narrow terminal: title only, wrapped with a hanging indent.
    Wrapped,
}

pub fn layout_mode(width: u16) -> LayoutMode {
    if width >= COLUMN_MODE_MIN_WIDTH {
        LayoutMode::Columns
    } else {
        LayoutMode::Wrapped
    }
}

/// Wraps `text` to `width` columns (measured in display cells, not bytes),
/// indenting every line after the first with `prefix`. If `width` doesn't
/// exceed `prefix`'s width, `text` is returned unchanged on a single line.
pub fn wrap_with_hanging_indent(prefix: &str, text: &str, width: usize) -> Vec<String> {
    let prefix_width = prefix.width();
    if width <= prefix_width {
        return vec![text.to_string()];
    }
    let first_width = width;
    let rest_width = width - prefix_width;

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = word.width();
        let limit = if lines.is_empty() { first_width } else { rest_width };
        let sep = if current.is_empty() { 0 } else { 1 };
        if current_width + sep + word_width > limit && !current.is_empty() {
            lines.push(if lines.is_empty() {
                std::mem::take(&mut current)
            } else {
                format!("{prefix}{current}")
            });
            current = word.to_string();
            current_width = word_width;
        } else {
            if sep == 1 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(if lines.is_empty() {
            current
        } else {
            format!("{prefix}{current}")
        });
    }
    lines
}

/// Truncates `text` to `max_width` display cells, appending `…` when cut.
/// For `max_width <= 3`, returns `max_width` dots instead (no room for a
/// partial word plus ellipsis).
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

/// Formats a duration between `when` and `now`: <60s "now"; <60m "Nm ago";
/// <24h "Nh ago"; <100d "Nd ago"; >=100d same calendar year "Mon DD";
/// otherwise "Mon 'YY". `when = None` (the zero-time sentinel) formats as "".
pub fn format_relative_time(when: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(when) = when else {
        return String::new();
    };
    let delta = now.signed_duration_since(when);
    let secs = delta.num_seconds();
    if secs < 60 {
        "now".to_string()
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else if secs < 86_400 {
        format!("{}h ago", secs / 3600)
    } else if secs < 100 * 86_400 {
        format!("{}d ago", secs / 86_400)
    } else if when.year() == now.year() {
        when.format("%b %d").to_string()
    } else {
        when.format("%b '%y").to_string()
    }
}
