//! Color theme definitions for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::session::presenter::NoticeLevel;

/// A complete color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub list_selected: Style,
    pub list_header: Style,
    pub list_normal: Style,
    pub list_dim: Style,
    pub field_label: Style,
    pub field_value: Style,
    pub placeholder: Style,
    pub gauge: Style,
    pub gauge_expired: Style,
    pub message_header_label: Style,
    pub message_header_value: Style,
    pub message_body: Style,
    pub border: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub key_hint: Style,
    pub help_dim: Style,
    pub toast_info: Style,
    pub toast_warning: Style,
    pub toast_error: Style,
}

impl Theme {
    /// Theme by config name; anything but `"light"` gives the dark theme.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_header: Style::default()
                .fg(Color::Rgb(180, 180, 200))
                .bg(Color::Rgb(40, 40, 60))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            list_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            field_label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            field_value: Style::default()
                .fg(Color::Rgb(230, 230, 240))
                .add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::Rgb(110, 110, 130)),
            gauge: Style::default()
                .fg(Color::Rgb(90, 200, 140))
                .bg(Color::Rgb(40, 40, 60)),
            gauge_expired: Style::default()
                .fg(Color::Rgb(230, 90, 90))
                .bg(Color::Rgb(40, 40, 60)),
            message_header_label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            message_header_value: Style::default().fg(Color::Rgb(220, 220, 230)),
            message_body: Style::default().fg(Color::Rgb(220, 220, 230)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            toast_info: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(130, 170, 255)),
            toast_warning: Style::default().fg(Color::Black).bg(Color::Yellow),
            toast_error: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(180, 50, 50)),
        }
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(30, 30, 40))
                .bg(Color::Rgb(220, 220, 230)),
            status_bar: Style::default()
                .fg(Color::Rgb(70, 70, 90))
                .bg(Color::Rgb(220, 220, 230)),
            list_selected: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(190, 200, 240)),
            list_header: Style::default()
                .fg(Color::Rgb(40, 40, 60))
                .bg(Color::Rgb(205, 205, 220))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(30, 30, 40)),
            list_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            field_label: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            field_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            placeholder: Style::default().fg(Color::Rgb(140, 140, 150)),
            gauge: Style::default()
                .fg(Color::Rgb(30, 150, 90))
                .bg(Color::Rgb(215, 215, 225)),
            gauge_expired: Style::default()
                .fg(Color::Rgb(190, 40, 40))
                .bg(Color::Rgb(215, 215, 225)),
            message_header_label: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            message_header_value: Style::default().fg(Color::Rgb(30, 30, 40)),
            message_body: Style::default().fg(Color::Rgb(30, 30, 40)),
            border: Style::default().fg(Color::Rgb(160, 160, 180)),
            popup: Style::default()
                .fg(Color::Rgb(30, 30, 40))
                .bg(Color::Rgb(245, 245, 250)),
            popup_title: Style::default()
                .fg(Color::Rgb(30, 80, 180))
                .add_modifier(Modifier::BOLD),
            key_hint: Style::default()
                .fg(Color::Rgb(160, 90, 0))
                .add_modifier(Modifier::BOLD),
            help_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            toast_info: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(30, 80, 180)),
            toast_warning: Style::default()
                .fg(Color::Black)
                .bg(Color::Rgb(240, 190, 60)),
            toast_error: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(180, 50, 50)),
        }
    }

    /// Style for a notification of the given level.
    pub fn toast(&self, level: NoticeLevel) -> Style {
        match level {
            NoticeLevel::Info => self.toast_info,
            NoticeLevel::Warning => self.toast_warning,
            NoticeLevel::Error => self.toast_error,
        }
    }
}
