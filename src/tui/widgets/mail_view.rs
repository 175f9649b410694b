//! Message detail popup.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::model::mail::Message;
use crate::tui::app::App;

/// Render the open message, if any, centered over the rest of the screen.
pub fn render(frame: &mut Frame, app: &App) {
    let Some(message) = app.view().detail.as_ref() else {
        return;
    };
    let theme = &app.theme;
    let screen = frame.area();

    let width = (screen.width * 70 / 100).max(30);
    let height = (screen.height * 60 / 100).max(8);
    let area = centered_rect_exact(width, height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(" Message ")
        .title_bottom(" Esc close ")
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = build_lines(message, app, inner.width as usize);
    let max_scroll = lines.len().saturating_sub(inner.height as usize);
    let scroll = app.detail_scroll_offset.min(max_scroll);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn build_lines<'a>(message: &'a Message, app: &App, width: usize) -> Vec<Line<'a>> {
    let theme = &app.theme;
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Subject: ", theme.message_header_label),
            Span::styled(message.subject.as_str(), theme.message_header_value),
        ]),
        Line::from(vec![
            Span::styled("Time:    ", theme.message_header_label),
            Span::styled(message.time_label.as_str(), theme.message_header_value),
        ]),
    ];
    if let Some(address) = app.view().address.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("To:      ", theme.message_header_label),
            Span::styled(address.to_string(), theme.message_header_value),
        ]));
    }

    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        theme.border,
    )));
    lines.push(Line::from(""));

    for line in message.body.lines() {
        lines.push(Line::from(Span::styled(line, theme.message_body)));
    }
    lines
}
