//! Help popup showing keyboard shortcuts in multi-column layout.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::session::LIFETIME_SECS;
use crate::tui::app::App;
use crate::tui::theme::Theme;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A single shortcut entry.
struct Shortcut {
    key: &'static str,
    desc: &'static str,
}

const ADDRESS_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "r",
        desc: "New address",
    },
    Shortcut {
        key: "d",
        desc: "Delete address",
    },
    Shortcut {
        key: "c",
        desc: "Copy address",
    },
    Shortcut {
        key: "p",
        desc: "Copy password",
    },
];

const INBOX_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "j / k",
        desc: "Next / previous",
    },
    Shortcut {
        key: "g / G",
        desc: "Newest / oldest",
    },
    Shortcut {
        key: "Enter",
        desc: "Open message",
    },
    Shortcut {
        key: "Esc",
        desc: "Close message",
    },
];

const GENERAL_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "?",
        desc: "This help",
    },
    Shortcut {
        key: "q",
        desc: "Quit",
    },
    Shortcut {
        key: "Ctrl-C",
        desc: "Force quit",
    },
];

/// Render the help popup centered on screen with multi-column shortcuts.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let screen = frame.area();

    let popup_width = (screen.width * 78 / 100).min(screen.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(2) as usize; // borders

    let cols = if inner_width >= 90 {
        3
    } else if inner_width >= 56 {
        2
    } else {
        1
    };
    let col_width = inner_width / cols;
    let sep_width = inner_width.saturating_sub(2);

    let lines = build_lines(cols, col_width, sep_width, app.session.countdown().lifetime(), theme);

    let content_height = lines.len() as u16 + 1;
    let popup_height = (content_height + 2).min(screen.height.saturating_sub(2));

    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(" Help ")
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Build all the help content lines.
fn build_lines(
    cols: usize,
    col_width: usize,
    sep_width: usize,
    lifetime_secs: u32,
    theme: &Theme,
) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("  tempmail", theme.popup_title),
        Span::styled(format!("  v{VERSION}"), theme.help_dim),
    ]));
    let lifetime = if lifetime_secs == LIFETIME_SECS {
        "10 minutes".to_string()
    } else {
        format!("{lifetime_secs} seconds")
    };
    lines.push(Line::from(Span::styled(
        format!("  Simulated throwaway mailbox. Each address lives {lifetime}; nothing is sent or stored."),
        theme.help_dim,
    )));
    lines.push(Line::from(""));

    for (title, shortcuts) in [
        ("Address", ADDRESS_SHORTCUTS),
        ("Inbox", INBOX_SHORTCUTS),
        ("General", GENERAL_SHORTCUTS),
    ] {
        add_section_header(&mut lines, title, theme, sep_width);
        add_shortcuts_columns(&mut lines, shortcuts, cols, col_width, theme);
        lines.push(Line::from(""));
    }

    lines
}

/// Add a section header with a trailing separator line.
fn add_section_header(lines: &mut Vec<Line<'static>>, title: &str, theme: &Theme, width: usize) {
    let title_len = title.len() + 4;
    let remaining = width.saturating_sub(title_len);
    let sep = "\u{2500}".repeat(remaining);
    lines.push(Line::from(vec![
        Span::styled(format!("  {title} "), theme.popup_title),
        Span::styled(sep, theme.help_dim),
    ]));
}

/// Lay out shortcuts in N columns per row.
fn add_shortcuts_columns(
    lines: &mut Vec<Line<'static>>,
    shortcuts: &[Shortcut],
    cols: usize,
    col_width: usize,
    theme: &Theme,
) {
    let key_w: usize = 8;

    for row in shortcuts.chunks(cols) {
        let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];

        for s in row {
            let padded_key = format!("{:>width$}", s.key, width = key_w);
            let desc_avail = col_width.saturating_sub(key_w + 3);
            let desc = if s.desc.len() > desc_avail {
                format!("{}.", &s.desc[..desc_avail.saturating_sub(1)])
            } else {
                s.desc.to_string()
            };
            let padding = col_width.saturating_sub(key_w + 1 + desc.len()).max(1);

            spans.push(Span::styled(padded_key, theme.key_hint));
            spans.push(Span::styled(format!(" {desc}"), theme.popup));
            spans.push(Span::raw(" ".repeat(padding)));
        }

        lines.push(Line::from(spans));
    }
}
