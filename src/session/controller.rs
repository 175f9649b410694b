//! Session lifecycle: create, refresh, delete, expire.
//!
//! [`SessionController`] owns the identity, its countdown and its inbox, and
//! is the only thing that starts or stops the session timers. Every action
//! and every timer callback runs to completion and ends by re-rendering
//! whatever it changed through the [`Presenter`].
//!
//! Timers carry the [`Generation`] they were started under. Creating or
//! deleting a session bumps the generation, so a callback that belongs to an
//! earlier identity is dropped even if it was already collected as due.

use std::time::Duration;

use super::clipboard::{Clipboard, InternalClipboard, Osc52Clipboard};
use super::countdown::{Countdown, CountdownState, TickOutcome};
use super::feed::MessageFeed;
use super::generator::IdentityGenerator;
use super::presenter::{Notice, Presenter};
use super::random::RandomSource;
use super::scheduler::{Clock, Fired, Generation, Scheduler, SystemClock, TimerKind, TimerQueue};
use super::{SessionSettings, ARRIVAL_NOTICE_DURATION, EXPIRED_NOTICE_DURATION, NOTICE_DURATION};
use crate::model::identity::Identity;
use crate::model::mail::{Inbox, Message};

/// Notification texts.
pub mod notices {
    pub const REFRESHED: &str = "New temporary address generated";
    pub const NOTHING_TO_DELETE: &str = "No temporary email to delete.";
    pub const DELETED: &str = "Temporary email deleted.";
    pub const EXPIRED: &str = "Temporary email expired.";
    pub const NEW_MESSAGE: &str = "New message received";
    pub const NO_EMAIL_TO_COPY: &str = "No email to copy.";
    pub const NO_PASSWORD_TO_COPY: &str = "No password to copy.";
    pub const EMAIL_COPIED: &str = "Email copied to clipboard";
    pub const PASSWORD_COPIED: &str = "Password copied to clipboard";
    pub const EMAIL_COPIED_FALLBACK: &str = "Email copied (fallback)";
    pub const PASSWORD_COPIED_FALLBACK: &str = "Password copied (fallback)";
    pub const EMAIL_COPY_FAILED: &str = "Email copy failed";
    pub const PASSWORD_COPY_FAILED: &str = "Password copy failed";
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity (initial, or after delete).
    NoSession,
    /// Identity live, countdown and feed running.
    Active,
    /// Lifetime ran out. Identity and inbox still shown, timers stopped.
    ExpiredHeld,
}

/// Which identity field a copy action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CopyField {
    Address,
    Password,
}

impl CopyField {
    fn missing(self) -> &'static str {
        match self {
            Self::Address => notices::NO_EMAIL_TO_COPY,
            Self::Password => notices::NO_PASSWORD_TO_COPY,
        }
    }

    fn copied(self) -> &'static str {
        match self {
            Self::Address => notices::EMAIL_COPIED,
            Self::Password => notices::PASSWORD_COPIED,
        }
    }

    fn copied_fallback(self) -> &'static str {
        match self {
            Self::Address => notices::EMAIL_COPIED_FALLBACK,
            Self::Password => notices::PASSWORD_COPIED_FALLBACK,
        }
    }

    fn failed(self) -> &'static str {
        match self {
            Self::Address => notices::EMAIL_COPY_FAILED,
            Self::Password => notices::PASSWORD_COPY_FAILED,
        }
    }
}

/// Owns one disposable-mailbox session and drives its presenter.
pub struct SessionController<P: Presenter, C: Clock = SystemClock> {
    presenter: P,
    clock: C,
    rng: Box<dyn RandomSource>,
    generator: IdentityGenerator,
    countdown: Countdown,
    feed: MessageFeed,
    timers: TimerQueue,
    generation: Generation,
    identity: Option<Identity>,
    inbox: Inbox,
    clipboard: Box<dyn Clipboard>,
    fallback_clipboard: Box<dyn Clipboard>,
}

impl<P: Presenter, C: Clock> SessionController<P, C> {
    /// Build a controller with no session yet. Call
    /// [`create_session`](Self::create_session) to start one.
    ///
    /// Copies go to the terminal clipboard, falling back to an in-process
    /// register; see [`with_clipboards`](Self::with_clipboards).
    ///
    /// Settings that fail [`SessionSettings::validate`] are replaced by the
    /// defaults.
    pub fn new(
        settings: SessionSettings,
        presenter: P,
        clock: C,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let settings = match settings.validate() {
            Ok(()) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Unusable session settings, using defaults");
                SessionSettings::default()
            }
        };
        Self {
            presenter,
            clock,
            rng,
            generator: IdentityGenerator::new(settings.domains),
            countdown: Countdown::new(settings.lifetime_secs),
            feed: MessageFeed::new(
                settings.feed_period,
                settings.feed_skip_probability,
                settings.subjects,
            ),
            timers: TimerQueue::new(),
            generation: Generation::default(),
            identity: None,
            inbox: Inbox::new(),
            clipboard: Box::new(Osc52Clipboard::stdout()),
            fallback_clipboard: Box::new(InternalClipboard::new()),
        }
    }

    /// Replace the primary and fallback clipboard backends.
    pub fn with_clipboards(
        mut self,
        primary: Box<dyn Clipboard>,
        fallback: Box<dyn Clipboard>,
    ) -> Self {
        self.clipboard = primary;
        self.fallback_clipboard = fallback;
        self
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        match (&self.identity, self.countdown.state()) {
            (None, _) => SessionState::NoSession,
            (Some(_), CountdownState::Expired) => SessionState::ExpiredHeld,
            (Some(_), _) => SessionState::Active,
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn inbox(&self) -> &Inbox {
        &self.inbox
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn feed(&self) -> &MessageFeed {
        &self.feed
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    // ── Actions ────────────────────────────────────────────────

    /// Start a fresh session: new identity, empty inbox, full countdown,
    /// feed running. Prior timers are stopped before new ones start.
    pub fn create_session(&mut self) {
        self.stop_timers();
        self.generation = self.generation.next();

        let identity = self.generator.generate(&mut *self.rng, self.clock.wall_time());
        tracing::info!(
            address = %identity.address,
            domain = identity.domain(),
            generation = self.generation.value(),
            lifetime_secs = self.countdown.lifetime(),
            "Created session"
        );
        self.identity = Some(identity);
        self.inbox.clear();

        let now = self.clock.elapsed();
        self.countdown.start(&mut self.timers, now, self.generation);
        self.feed.start(&mut self.timers, now, self.generation);

        self.render_all();
    }

    /// Discard the current identity and inbox (if any) and start over.
    pub fn refresh(&mut self) {
        self.create_session();
        self.presenter
            .notify(Notice::info(notices::REFRESHED, NOTICE_DURATION));
    }

    /// Remove the current identity. Without one this only notifies.
    pub fn delete(&mut self) {
        let Some(identity) = self.identity.take() else {
            self.presenter
                .notify(Notice::info(notices::NOTHING_TO_DELETE, NOTICE_DURATION));
            return;
        };

        self.countdown.clear(&mut self.timers);
        self.feed.stop(&mut self.timers);
        self.generation = self.generation.next();
        self.inbox.clear();
        tracing::info!(address = %identity.address, "Deleted session");

        self.render_all();
        self.presenter
            .notify(Notice::info(notices::DELETED, NOTICE_DURATION));
    }

    /// Open the detail view for message `id`. Returns `false` if no such
    /// message is in the inbox.
    pub fn select_message(&mut self, id: u64) -> bool {
        match self.inbox.get(id) {
            Some(message) => {
                self.presenter.render_message_detail(message);
                true
            }
            None => {
                tracing::debug!(id, "Selected message not in inbox");
                false
            }
        }
    }

    /// Close the detail view.
    pub fn close_detail(&mut self) {
        self.presenter.close_message_detail();
    }

    /// Copy the address to the clipboard.
    pub fn copy_address(&mut self) {
        self.copy_field(CopyField::Address);
    }

    /// Copy the password to the clipboard.
    pub fn copy_password(&mut self) {
        self.copy_field(CopyField::Password);
    }

    // ── Timers ─────────────────────────────────────────────────

    /// Run every timer that is due by the clock's current time. Returns the
    /// number of callbacks that actually ran.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.elapsed();
        let due = self.timers.take_due(now);
        due.into_iter().filter(|fired| self.on_timer(*fired)).count()
    }

    /// How long until the next timer is due, from the clock's current time.
    pub fn time_to_next_timer(&self) -> Option<Duration> {
        self.timers
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.clock.elapsed()))
    }

    fn on_timer(&mut self, fired: Fired) -> bool {
        // An earlier callback in the same batch may have stopped this timer.
        if fired.tag.generation != self.generation || !self.timers.is_scheduled(fired.handle) {
            tracing::debug!(
                kind = ?fired.tag.kind,
                timer_generation = fired.tag.generation.value(),
                generation = self.generation.value(),
                "Dropped stale timer"
            );
            return false;
        }
        match fired.tag.kind {
            TimerKind::Countdown => self.on_countdown_tick(),
            TimerKind::Feed => self.on_feed_tick(),
        }
        true
    }

    fn on_countdown_tick(&mut self) {
        match self.countdown.tick(&mut self.timers) {
            TickOutcome::Running(_) => self.render_countdown(),
            TickOutcome::Expired => self.expire(),
            TickOutcome::Ignored => {}
        }
    }

    fn expire(&mut self) {
        self.feed.stop(&mut self.timers);
        tracing::info!(
            address = self.identity.as_ref().map(|i| i.address.as_str()).unwrap_or(""),
            messages = self.inbox.len(),
            "Session expired"
        );
        self.render_countdown();
        self.presenter
            .notify(Notice::warning(notices::EXPIRED, EXPIRED_NOTICE_DURATION));
    }

    fn on_feed_tick(&mut self) {
        let now = self.clock.wall_time();
        let arrived: Option<Message> =
            self.feed
                .tick(&mut *self.rng, self.identity.as_ref(), &mut self.inbox, now);
        match arrived {
            Some(message) => {
                tracing::debug!(id = message.id, subject = %message.subject, "Message arrived");
                self.presenter.render_inbox(self.inbox.newest_first());
                self.presenter
                    .notify(Notice::info(notices::NEW_MESSAGE, ARRIVAL_NOTICE_DURATION));
            }
            None => tracing::trace!("Feed tick skipped"),
        }
    }

    fn stop_timers(&mut self) {
        self.countdown.stop(&mut self.timers);
        self.feed.stop(&mut self.timers);
    }

    // ── Rendering ──────────────────────────────────────────────

    fn render_all(&mut self) {
        let address = self.identity.as_ref().map(|i| i.address.as_str());
        let password = self.identity.as_ref().map(|i| i.password.as_str());
        self.presenter.render_identity(address);
        self.presenter.render_password(password);
        self.render_countdown();
        self.presenter.render_inbox(self.inbox.newest_first());
    }

    fn render_countdown(&mut self) {
        let text = self.countdown.display();
        self.presenter
            .render_countdown(&text, self.countdown.percent());
    }

    // ── Clipboard ──────────────────────────────────────────────

    fn copy_field(&mut self, field: CopyField) {
        let value = self.identity.as_ref().map(|i| match field {
            CopyField::Address => i.address.clone(),
            CopyField::Password => i.password.clone(),
        });
        let Some(value) = value else {
            self.presenter
                .notify(Notice::info(field.missing(), NOTICE_DURATION));
            return;
        };

        let notice = match self.clipboard.set_text(&value) {
            Ok(()) => Notice::info(field.copied(), NOTICE_DURATION),
            Err(e) => {
                tracing::warn!(
                    backend = self.clipboard.name(),
                    error = %e,
                    "Clipboard copy failed, trying fallback"
                );
                match self.fallback_clipboard.set_text(&value) {
                    Ok(()) => Notice::info(field.copied_fallback(), NOTICE_DURATION),
                    Err(e) => {
                        tracing::warn!(
                            backend = self.fallback_clipboard.name(),
                            error = %e,
                            "Fallback clipboard copy failed"
                        );
                        Notice::error(field.failed(), NOTICE_DURATION)
                    }
                }
            }
        };
        self.presenter.notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::presenter::RecordingPresenter;
    use crate::session::scheduler::ManualClock;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn controller() -> (SessionController<RecordingPresenter, ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let ctl = SessionController::new(
            SessionSettings::default(),
            RecordingPresenter::new(),
            clock.clone(),
            Box::new(ChaCha8Rng::seed_from_u64(11)),
        )
        .with_clipboards(
            Box::new(InternalClipboard::new()),
            Box::new(InternalClipboard::new()),
        );
        (ctl, clock)
    }

    #[test]
    fn test_starts_without_session() {
        let (ctl, _) = controller();
        assert_eq!(ctl.state(), SessionState::NoSession);
        assert!(ctl.timers().is_empty());
    }

    #[test]
    fn test_create_renders_everything() {
        let (mut ctl, _) = controller();
        ctl.create_session();
        assert_eq!(ctl.state(), SessionState::Active);
        let p = ctl.presenter();
        let address = ctl.identity().map(|i| i.address.as_str());
        assert_eq!(p.last_identity(), Some(address));
        assert_eq!(p.last_countdown(), Some(("10:00", 100)));
        assert_eq!(p.last_inbox().map(<[Message]>::len), Some(0));
        assert!(p.notices().is_empty());
    }

    #[test]
    fn test_empty_lists_fall_back_to_defaults() {
        let settings = SessionSettings {
            domains: Vec::new(),
            subjects: Vec::new(),
            ..SessionSettings::default()
        };
        let mut ctl = SessionController::new(
            settings,
            RecordingPresenter::new(),
            ManualClock::new(),
            Box::new(ChaCha8Rng::seed_from_u64(11)),
        );
        ctl.create_session();
        let domain = ctl.identity().map(|i| i.domain().to_string());
        assert!(crate::session::DOMAINS
            .iter()
            .any(|d| domain.as_deref() == Some(*d)));
        assert_eq!(ctl.state(), SessionState::Active);
    }

    #[test]
    fn test_one_timer_of_each_kind() {
        let (mut ctl, _) = controller();
        ctl.create_session();
        ctl.refresh();
        ctl.refresh();
        assert_eq!(ctl.timers().count_kind(TimerKind::Countdown), 1);
        assert_eq!(ctl.timers().count_kind(TimerKind::Feed), 1);
        assert_eq!(ctl.generation().value(), 3);
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let (mut ctl, _) = controller();
        ctl.create_session();
        let stale = Fired {
            handle: ctl.countdown().timer().expect("running"),
            tag: crate::session::scheduler::TimerTag {
                kind: TimerKind::Countdown,
                generation: Generation::default(),
            },
            due: Duration::from_secs(1),
        };
        assert!(!ctl.on_timer(stale));
        assert_eq!(ctl.countdown().remaining(), 600);
    }

    #[test]
    fn test_time_to_next_timer() {
        let (mut ctl, clock) = controller();
        assert_eq!(ctl.time_to_next_timer(), None);
        ctl.create_session();
        clock.advance(Duration::from_millis(400));
        assert_eq!(ctl.time_to_next_timer(), Some(Duration::from_millis(600)));
    }
}
