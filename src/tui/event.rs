//! Keyboard and input event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Windows reports releases too; only act on presses.
    if key.kind == KeyEventKind::Release {
        return Ok(());
    }

    // Ctrl+C always quits, even with a popup open
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // ── Popup handling (captures all keys) ────────────────
    if app.show_help {
        match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => app.show_help = false,
            _ => {}
        }
        return Ok(());
    }

    if app.view().detail.is_some() {
        return handle_detail_keys(app, key);
    }

    handle_main_keys(app, key)
}

/// Key handling for the main screen (identity panel + inbox).
fn handle_main_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        // ── Session actions ──────────────────────────────────
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('d') => app.delete(),
        KeyCode::Char('c') => app.session.copy_address(),
        KeyCode::Char('p') => app.session.copy_password(),

        // ── Navigation ───────────────────────────────────────
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::PageDown => {
            let page = app.list_viewport_height.max(1) as isize;
            app.move_selection(page);
        }
        KeyCode::PageUp => {
            let page = app.list_viewport_height.max(1) as isize;
            app.move_selection(-page);
        }
        KeyCode::Enter => app.open_selected(),
        _ => {}
    }
    Ok(())
}

/// Key handling while a message is open.
fn handle_detail_keys(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.detail_scroll_offset += 1;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.detail_scroll_offset = app.detail_scroll_offset.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.detail_scroll_offset = 0;
        }
        // Copy shortcuts keep working over the popup
        KeyCode::Char('c') => app.session.copy_address(),
        KeyCode::Char('p') => app.session.copy_password(),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clipboard::InternalClipboard;
    use crate::session::controller::SessionController;
    use crate::session::scheduler::SystemClock;
    use crate::tui::app::View;
    use crate::tui::theme::Theme;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn app() -> App {
        let session = SessionController::new(
            Default::default(),
            View::default(),
            SystemClock::new(),
            Box::new(ChaCha8Rng::seed_from_u64(7)),
        )
        .with_clipboards(
            Box::new(InternalClipboard::new()),
            Box::new(InternalClipboard::new()),
        );
        App::with_session(session, Theme::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).expect("key");
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut a = app();
        a.show_help = true;
        handle_key_event(
            &mut a,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .expect("key");
        assert!(a.should_quit);
    }

    #[test]
    fn test_help_captures_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('?'));
        assert!(a.show_help);
        let before = a.view().address.clone();
        press(&mut a, KeyCode::Char('d'));
        assert_eq!(a.view().address, before);
        press(&mut a, KeyCode::Esc);
        assert!(!a.show_help);
    }

    #[test]
    fn test_refresh_and_delete_keys() {
        let mut a = app();
        let first = a.view().address.clone();
        press(&mut a, KeyCode::Char('r'));
        assert!(a.view().address.is_some());
        assert_ne!(a.view().address, first);

        press(&mut a, KeyCode::Char('d'));
        assert!(a.view().address.is_none());
        assert!(a.session.identity().is_none());
    }

    #[test]
    fn test_copy_key_notifies() {
        let mut a = app();
        press(&mut a, KeyCode::Char('c'));
        let (notice, _) = a.view().toast.as_ref().expect("toast");
        assert_eq!(notice.text, "Email copied to clipboard");
    }

    #[test]
    fn test_enter_on_empty_inbox_does_nothing() {
        let mut a = app();
        press(&mut a, KeyCode::Enter);
        assert!(a.view().detail.is_none());
    }
}
