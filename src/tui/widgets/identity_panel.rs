//! Address, password and lifetime gauge.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::session::countdown::EXPIRED_LABEL;
use crate::tui::app::App;

/// Shown in place of a missing address or password.
const PLACEHOLDER: &str = "\u{2014}";

/// Height the panel needs, borders included.
pub const HEIGHT: u16 = 5;

/// Render the identity panel.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let view = app.view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" Temporary address ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(field_line("Address ", view.address.as_deref(), "c", app)),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(field_line("Password", view.password.as_deref(), "p", app)),
        rows[1],
    );

    let expired = view.countdown_text == EXPIRED_LABEL;
    let label = if expired {
        EXPIRED_LABEL.to_string()
    } else {
        format!("Expires in {}", view.countdown_text)
    };
    let gauge = Gauge::default()
        .gauge_style(if expired { theme.gauge_expired } else { theme.gauge })
        .percent(u16::from(view.countdown_percent.min(100)))
        .label(label);
    frame.render_widget(gauge, rows[2]);
}

fn field_line<'a>(label: &'a str, value: Option<&'a str>, copy_key: &'a str, app: &App) -> Line<'a> {
    let theme = &app.theme;
    let value_span = match value {
        Some(v) => Span::styled(v, theme.field_value),
        None => Span::styled(PLACEHOLDER, theme.placeholder),
    };
    Line::from(vec![
        Span::styled(format!(" {label}  "), theme.field_label),
        value_span,
        Span::styled(format!("   [{copy_key}] copy"), theme.help_dim),
    ])
}
