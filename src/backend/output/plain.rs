//! Plain text output formatter.
//!
//! Renders the captured buffer as plain text without any styling.
//! This is the simplest format, ideal for text comparisons and assertions.

use crate::backend::CaptureBackend;

/// Renders the backend as plain text.
///
/// Each row is rendered on its own line. Trailing spaces on each line
/// are preserved to maintain the exact buffer representation.
pub fn render(backend: &CaptureBackend) -> String {
    let height = backend.height();
    let mut lines = Vec::with_capacity(height as usize);

    for y in 0..height {
        lines.push(backend.row_content(y));
    }

    lines.join("\n")
}

/// Renders the backend as plain text with trailing whitespace trimmed.
///
/// This is useful when you want a cleaner output for display,
/// but note that it may not exactly match the buffer contents.
pub fn render_trimmed(backend: &CaptureBackend) -> String {
    let height = backend.height();
    let mut lines = Vec::with_capacity(height as usize);

    for y in 0..height {
        lines.push(backend.row_content(y).trim_end().to_string());
    }

    // Also trim trailing empty lines
    while lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n")
}
