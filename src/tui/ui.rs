//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Vertical layout: header (1) + identity + inbox (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                               // header bar
            Constraint::Length(widgets::identity_panel::HEIGHT), // address, password, timer
            Constraint::Min(3),                                  // inbox
            Constraint::Length(1),                               // status bar
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);
    widgets::identity_panel::render(frame, app, vertical[1]);
    widgets::mail_list::render(frame, app, vertical[2]);
    widgets::status_bar::render(frame, app, vertical[3]);

    // Popups (rendered on top of everything)
    if app.view().detail.is_some() {
        widgets::mail_view::render(frame, app);
    }
    if app.show_help {
        widgets::help_popup::render(frame, app);
    }
}
