//! Top header bar showing the app name and message count.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::session::controller::SessionState;
use crate::tui::app::App;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let count = app.view().messages.len();
    let plural = if count == 1 { "" } else { "s" };
    let state = match app.session.state() {
        SessionState::NoSession => "no address",
        SessionState::Active => "active",
        SessionState::ExpiredHeld => "expired",
    };

    let mut spans = vec![
        Span::styled(" tempmail", theme.header_bar),
        Span::styled(format!(" | {count} message{plural}"), theme.header_bar),
        Span::styled(format!(" | {state}"), theme.header_bar),
    ];

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.len()).sum();
    let right_text = " [?] Help ";
    let width = area.width as usize;
    if width > left_len + right_text.len() {
        let padding = width - left_len - right_text.len();
        spans.push(Span::styled(" ".repeat(padding), theme.header_bar));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
