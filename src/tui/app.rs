//! Global application state for the TUI (the "Model" in Elm architecture).

use std::time::Instant;

use crate::config::Config;
use crate::model::mail::Message;
use crate::session::controller::SessionController;
use crate::session::countdown::EXPIRED_LABEL;
use crate::session::presenter::{Notice, Presenter};
use crate::session::random::RandomSource;
use crate::session::scheduler::SystemClock;
use crate::tui::theme::Theme;

/// What the session last asked to be displayed.
///
/// The controller writes here through [`Presenter`]; widgets only read.
#[derive(Debug, Clone)]
pub struct View {
    /// Current address (`None` after delete).
    pub address: Option<String>,
    /// Current password (`None` after delete).
    pub password: Option<String>,
    /// `MM:SS` or `Expired`.
    pub countdown_text: String,
    /// Share of the lifetime left, 0–100.
    pub countdown_percent: u8,
    /// Inbox snapshot, newest first.
    pub messages: Vec<Message>,
    /// Message open in the detail popup.
    pub detail: Option<Message>,
    /// Notification being shown and when it appeared.
    pub toast: Option<(Notice, Instant)>,
}

impl Default for View {
    fn default() -> Self {
        Self {
            address: None,
            password: None,
            countdown_text: EXPIRED_LABEL.to_string(),
            countdown_percent: 0,
            messages: Vec::new(),
            detail: None,
            toast: None,
        }
    }
}

impl View {
    /// Drop the toast once its duration has passed.
    pub fn expire_toast(&mut self) {
        if let Some((notice, shown)) = &self.toast {
            if shown.elapsed() >= notice.duration {
                self.toast = None;
            }
        }
    }
}

impl Presenter for View {
    fn render_identity(&mut self, address: Option<&str>) {
        self.address = address.map(str::to_string);
    }

    fn render_password(&mut self, password: Option<&str>) {
        self.password = password.map(str::to_string);
    }

    fn render_countdown(&mut self, text: &str, percent: u8) {
        self.countdown_text = text.to_string();
        self.countdown_percent = percent;
    }

    fn render_inbox(&mut self, messages: Vec<Message>) {
        // The open message may belong to a discarded inbox.
        if let Some(open) = &self.detail {
            if !messages.iter().any(|m| m == open) {
                self.detail = None;
            }
        }
        self.messages = messages;
    }

    fn render_message_detail(&mut self, message: &Message) {
        self.detail = Some(message.clone());
    }

    fn close_message_detail(&mut self) {
        self.detail = None;
    }

    fn notify(&mut self, notice: Notice) {
        self.toast = Some((notice, Instant::now()));
    }
}

/// Complete TUI state.
pub struct App {
    // ── Session ───────────────────────────────
    /// The mailbox session; its presenter is the [`View`] drawn each frame.
    pub session: SessionController<View, SystemClock>,

    // ── Navigation ────────────────────────────
    /// Id of the highlighted inbox message.
    pub selected_id: Option<u64>,
    /// Scroll offset for the inbox list.
    pub list_scroll_offset: usize,
    /// Cached viewport height for the list (set during render).
    pub list_viewport_height: usize,
    /// Scroll offset inside the detail popup.
    pub detail_scroll_offset: usize,

    // ── UI state ──────────────────────────────
    /// Help popup visible?
    pub show_help: bool,
    /// Active colors.
    pub theme: Theme,

    // ── Lifecycle ─────────────────────────────
    pub should_quit: bool,
}

impl App {
    /// Create the app and start the first session.
    pub fn new(config: &Config, rng: Box<dyn RandomSource>) -> Self {
        let session = SessionController::new(
            config.session_settings(),
            View::default(),
            SystemClock::new(),
            rng,
        );
        Self::with_session(session, Theme::from_name(&config.display.theme))
    }

    /// Wrap an existing controller and start its first session.
    pub fn with_session(session: SessionController<View, SystemClock>, theme: Theme) -> Self {
        let mut app = Self {
            session,
            selected_id: None,
            list_scroll_offset: 0,
            list_viewport_height: 10,
            detail_scroll_offset: 0,
            show_help: false,
            theme,
            should_quit: false,
        };
        app.session.create_session();
        app
    }

    /// What the session last rendered.
    pub fn view(&self) -> &View {
        self.session.presenter()
    }

    /// Position of the highlighted message in the newest-first list.
    pub fn selected_index(&self) -> Option<usize> {
        let messages = &self.view().messages;
        if messages.is_empty() {
            return None;
        }
        let pos = self
            .selected_id
            .and_then(|id| messages.iter().position(|m| m.id == id));
        Some(pos.unwrap_or(0))
    }

    /// Move the highlight by `delta` rows, clamped to the list.
    pub fn move_selection(&mut self, delta: isize) {
        let Some(current) = self.selected_index() else {
            return;
        };
        let last = self.view().messages.len() - 1;
        let target = current.saturating_add_signed(delta).min(last);
        self.select_row(target);
    }

    /// Highlight the first (newest) row.
    pub fn select_first(&mut self) {
        self.select_row(0);
    }

    /// Highlight the last (oldest) row.
    pub fn select_last(&mut self) {
        let count = self.view().messages.len();
        self.select_row(count.saturating_sub(1));
    }

    fn select_row(&mut self, row: usize) {
        self.selected_id = self.view().messages.get(row).map(|m| m.id);
        self.ensure_selected_visible();
    }

    /// Open the highlighted message in the detail popup.
    pub fn open_selected(&mut self) {
        let id = self
            .selected_index()
            .and_then(|row| self.view().messages.get(row))
            .map(|m| m.id);
        if let Some(id) = id {
            self.detail_scroll_offset = 0;
            self.session.select_message(id);
        }
    }

    /// Close the detail popup.
    pub fn close_detail(&mut self) {
        self.detail_scroll_offset = 0;
        self.session.close_detail();
    }

    /// Start over with a new address.
    pub fn refresh(&mut self) {
        self.reset_navigation();
        self.session.refresh();
    }

    /// Delete the current address.
    pub fn delete(&mut self) {
        self.reset_navigation();
        self.session.delete();
    }

    fn reset_navigation(&mut self) {
        self.selected_id = None;
        self.list_scroll_offset = 0;
        self.detail_scroll_offset = 0;
    }

    /// Called every loop iteration: fires due session timers and clears
    /// expired notifications.
    pub fn tick(&mut self) {
        let ran = self.session.advance();
        if ran > 0 {
            tracing::trace!(ran, "Session timers fired");
        }
        self.session.presenter_mut().expire_toast();
    }

    /// Ensure the selected row is visible given the current scroll offset.
    pub fn ensure_selected_visible(&mut self) {
        let Some(selected) = self.selected_index() else {
            self.list_scroll_offset = 0;
            return;
        };
        let vp = self.list_viewport_height.max(1);
        if selected < self.list_scroll_offset {
            self.list_scroll_offset = selected;
        } else if selected >= self.list_scroll_offset + vp {
            self.list_scroll_offset = selected.saturating_sub(vp - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::clipboard::InternalClipboard;
    use crate::session::presenter::Notice;
    use chrono::{TimeZone, Utc};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::time::Duration;

    fn app() -> App {
        let session = SessionController::new(
            Default::default(),
            View::default(),
            SystemClock::new(),
            Box::new(ChaCha8Rng::seed_from_u64(1)),
        )
        .with_clipboards(
            Box::new(InternalClipboard::new()),
            Box::new(InternalClipboard::new()),
        );
        App::with_session(session, Theme::dark())
    }

    fn message(id: u64) -> Message {
        Message {
            id,
            subject: format!("s{id}"),
            body: String::new(),
            received_at: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
            time_label: "00:00:00".to_string(),
        }
    }

    #[test]
    fn test_new_app_has_identity() {
        let app = app();
        assert!(app.view().address.is_some());
        assert_eq!(app.view().countdown_text, "10:00");
        assert_eq!(app.selected_index(), None);
    }

    #[test]
    fn test_selection_follows_ids() {
        let mut app = app();
        app.session
            .presenter_mut()
            .render_inbox(vec![message(3), message(2), message(1)]);
        app.move_selection(1);
        assert_eq!(app.selected_id, Some(2));
        // A new arrival on top keeps the same message highlighted.
        app.session
            .presenter_mut()
            .render_inbox(vec![message(4), message(3), message(2), message(1)]);
        assert_eq!(app.selected_index(), Some(2));
        app.move_selection(10);
        assert_eq!(app.selected_id, Some(1));
        app.move_selection(-10);
        assert_eq!(app.selected_id, Some(4));
    }

    #[test]
    fn test_delete_clears_view() {
        let mut app = app();
        app.delete();
        assert!(app.view().address.is_none());
        assert_eq!(app.view().countdown_text, "Expired");
        let (notice, _) = app.view().toast.as_ref().expect("toast");
        assert_eq!(notice.text, "Temporary email deleted.");
    }

    #[test]
    fn test_toast_expires() {
        let mut view = View::default();
        view.notify(Notice::info("x", Duration::ZERO));
        view.expire_toast();
        assert!(view.toast.is_none());

        view.notify(Notice::info("y", Duration::from_secs(60)));
        view.expire_toast();
        assert!(view.toast.is_some());
    }

    #[test]
    fn test_new_inbox_closes_stale_detail() {
        let mut view = View::default();
        view.render_inbox(vec![message(1)]);
        view.render_message_detail(&message(1));
        view.render_inbox(vec![message(2), message(1)]);
        assert!(view.detail.is_some());
        view.render_inbox(Vec::new());
        assert!(view.detail.is_none());
    }
}
