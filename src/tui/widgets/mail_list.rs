//! Inbox list, newest message first.

use ratatui::layout::{Constraint, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::tui::app::App;

/// Characters of body shown next to the subject.
const SNIPPET_CHARS: usize = 140;

/// Render the inbox table with virtual scrolling.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = app.theme.clone();

    let count = app.view().messages.len();
    let plural = if count == 1 { "" } else { "s" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" Inbox ({count} message{plural}) "));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if count == 0 {
        let empty = Paragraph::new(Line::styled(" No messages", theme.list_dim));
        frame.render_widget(empty, inner);
        return;
    }

    if inner.height < 2 {
        return;
    }

    // Header row takes 1 line, rest is data
    app.list_viewport_height = (inner.height as usize).saturating_sub(1);
    app.ensure_selected_visible();

    let time_w = 8u16;
    let subject_w = 22u16.min(inner.width / 3);
    let snippet_w = inner.width.saturating_sub(time_w + subject_w + 2);

    let constraints = [
        Constraint::Length(subject_w),
        Constraint::Min(snippet_w),
        Constraint::Length(time_w),
    ];

    let header = Row::new(vec!["Subject", "Preview", "Time"]).style(theme.list_header);

    let selected = app.selected_index();
    let view = app.view();
    let start = app.list_scroll_offset.min(count);
    let end = (start + app.list_viewport_height).min(count);

    let rows: Vec<Row> = view.messages[start..end]
        .iter()
        .enumerate()
        .map(|(offset, msg)| {
            let style = if Some(start + offset) == selected {
                theme.list_selected
            } else {
                theme.list_normal
            };
            Row::new(vec![
                truncate_str(&msg.subject, subject_w as usize),
                truncate_str(&msg.snippet(SNIPPET_CHARS), snippet_w as usize),
                msg.time_label.clone(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(rows, constraints)
        .header(header)
        .column_spacing(1);

    frame.render_widget(table, inner);
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let width = UnicodeWidthStr::width(s);
    if width <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let mut result = String::new();
        let mut current_width = 0;
        for ch in s.chars() {
            let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
            if current_width + ch_width + 3 > max_width {
                break;
            }
            result.push(ch);
            current_width += ch_width;
        }
        result.push_str("...");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_unchanged() {
        assert_eq!(truncate_str("Welcome", 10), "Welcome");
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_str("Verify your account", 10), "Verify ...");
    }

    #[test]
    fn test_truncate_tiny_width() {
        assert_eq!(truncate_str("Welcome", 2), "We");
    }
}
