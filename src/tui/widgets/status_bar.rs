//! Bottom status bar showing the current notification or keyboard hints.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::app::App;

/// Version string shown at the right edge of the status bar.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render the status bar at the bottom with hints or a toast, and the version.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    let version_text = format!("v{VERSION} ");
    let version_width = version_text.len() as u16;

    // Split: hints (flexible) | version (fixed)
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(version_width)])
        .split(area);

    let content = if let Some((notice, _)) = &app.view().toast {
        Line::from(Span::styled(
            format!(" {} ", notice.text),
            theme.toast(notice.level),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.key_hint));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let version = Paragraph::new(Line::from(Span::styled(version_text, theme.border)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(version, chunks[1]);
}

/// Return context-sensitive hint pairs (key, description).
fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    if app.view().detail.is_some() {
        return vec![("j/k", "scroll"), ("Esc", "close"), ("q", "quit")];
    }

    let mut hints = Vec::new();
    if !app.view().messages.is_empty() {
        hints.push(("j/k", "move"));
        hints.push(("Enter", "open"));
    }
    if app.view().address.is_some() {
        hints.push(("c", "copy address"));
        hints.push(("p", "copy password"));
        hints.push(("d", "delete"));
    }
    hints.push(("r", "new address"));
    hints.push(("?", "help"));
    hints.push(("q", "quit"));
    hints
}
