//! Terminal UI — main entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;

use std::io;
use std::time::Duration;

use crossterm::event::{poll as ct_poll, read as ct_read, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use self::app::App;
use crate::config::Config;
use crate::error::TempMailError;
use crate::session::random::source_from_seed;

/// Run the TUI application. Blocks until the user quits.
pub fn run_tui(config: &Config, seed: Option<u64>) -> anyhow::Result<()> {
    let app = App::new(config, source_from_seed(seed));
    let tick_rate = Duration::from_millis(config.display.tick_rate_ms.max(1));

    // Setup terminal (alternate screen)
    enable_raw_mode().map_err(TempMailError::Terminal)?;
    let mut stdout = io::stdout();
    stdout
        .execute(EnterAlternateScreen)
        .map_err(TempMailError::Terminal)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!(tick_ms = tick_rate.as_millis() as u64, "TUI started");

    // Run the event loop
    let result = run_event_loop(&mut terminal, app, tick_rate);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("TUI stopped");
    result
}

/// Main event loop: render → poll → handle → repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    loop {
        // Render
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        // Wake up in time for the next session timer
        let timeout = app
            .session
            .time_to_next_timer()
            .map_or(tick_rate, |due| due.min(tick_rate));

        // Poll for events
        if ct_poll(timeout)? {
            if let Event::Key(key) = ct_read()? {
                event::handle_key_event(&mut app, key)?;
            }
        }

        // Fire due timers, expire toasts
        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
