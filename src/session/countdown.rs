//! Lifetime countdown for the active identity.

use std::time::Duration;

use super::scheduler::{Generation, Scheduler, TimerHandle, TimerKind, TimerTag};
use super::COUNTDOWN_PERIOD;

/// Text shown once the countdown has run out (or there is nothing to count).
pub const EXPIRED_LABEL: &str = "Expired";

/// Countdown lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    /// Ticking once per second.
    Running,
    /// Reached zero; no longer ticking.
    Expired,
    /// Not ticking because there is no identity (or it was stopped).
    Stopped,
}

/// Result of processing one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Still running with this many seconds left.
    Running(u32),
    /// This tick took the countdown to zero. Reported exactly once.
    Expired,
    /// The countdown was not running; nothing changed.
    Ignored,
}

/// Seconds remaining for the current identity, driven by a 1 s timer.
#[derive(Debug, Clone)]
pub struct Countdown {
    state: CountdownState,
    remaining: u32,
    lifetime: u32,
    timer: Option<TimerHandle>,
}

impl Countdown {
    /// A stopped countdown for identities living `lifetime_secs`.
    pub fn new(lifetime_secs: u32) -> Self {
        Self {
            state: CountdownState::Stopped,
            remaining: 0,
            lifetime: lifetime_secs.max(1),
            timer: None,
        }
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn lifetime(&self) -> u32 {
        self.lifetime
    }

    /// Handle of the running tick timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Reset to the full lifetime and start ticking. Any previous timer is
    /// cancelled first.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler, now: Duration, generation: Generation) {
        self.cancel_timer(scheduler);
        self.remaining = self.lifetime;
        self.state = CountdownState::Running;
        self.timer = Some(scheduler.schedule_repeating(
            now,
            COUNTDOWN_PERIOD,
            TimerTag {
                kind: TimerKind::Countdown,
                generation,
            },
        ));
    }

    /// Stop ticking. Idempotent; the remaining time is left as is.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        self.cancel_timer(scheduler);
        self.state = CountdownState::Stopped;
    }

    /// Stop ticking and drop the remaining time to zero.
    pub fn clear(&mut self, scheduler: &mut dyn Scheduler) {
        self.stop(scheduler);
        self.remaining = 0;
    }

    /// Process one elapsed second.
    pub fn tick(&mut self, scheduler: &mut dyn Scheduler) -> TickOutcome {
        if self.state != CountdownState::Running {
            return TickOutcome::Ignored;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.cancel_timer(scheduler);
            self.state = CountdownState::Expired;
            return TickOutcome::Expired;
        }
        TickOutcome::Running(self.remaining)
    }

    /// Share of the lifetime left, as a whole percentage.
    pub fn percent(&self) -> u8 {
        let pct = (f64::from(self.remaining) / f64::from(self.lifetime) * 100.0).round();
        pct.clamp(0.0, 100.0) as u8
    }

    /// `MM:SS`, or [`EXPIRED_LABEL`] at zero.
    pub fn display(&self) -> String {
        format_remaining(self.remaining)
    }

    fn cancel_timer(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }
}

/// Format a number of seconds as `MM:SS`; zero reads [`EXPIRED_LABEL`].
pub fn format_remaining(seconds: u32) -> String {
    if seconds == 0 {
        return EXPIRED_LABEL.to_string();
    }
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::scheduler::TimerQueue;

    fn started(lifetime: u32) -> (Countdown, TimerQueue) {
        let mut q = TimerQueue::new();
        let mut c = Countdown::new(lifetime);
        c.start(&mut q, Duration::ZERO, Generation::default());
        (c, q)
    }

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(600), "10:00");
        assert_eq!(format_remaining(61), "01:01");
        assert_eq!(format_remaining(9), "00:09");
        assert_eq!(format_remaining(0), "Expired");
    }

    #[test]
    fn test_expires_exactly_once() {
        let (mut c, mut q) = started(3);
        assert_eq!(c.tick(&mut q), TickOutcome::Running(2));
        assert_eq!(c.tick(&mut q), TickOutcome::Running(1));
        assert_eq!(c.tick(&mut q), TickOutcome::Expired);
        assert_eq!(c.tick(&mut q), TickOutcome::Ignored);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.state(), CountdownState::Expired);
        assert!(q.is_empty(), "expiry cancels the tick timer");
    }

    #[test]
    fn test_percent_rounding() {
        let (mut c, mut q) = started(8);
        assert_eq!(c.percent(), 100);
        c.tick(&mut q);
        // 7 / 8 = 87.5% rounds half away from zero.
        assert_eq!(c.percent(), 88);
        c.tick(&mut q);
        assert_eq!(c.percent(), 75);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let (mut c, mut q) = started(10);
        c.tick(&mut q);
        c.stop(&mut q);
        c.stop(&mut q);
        assert_eq!(c.state(), CountdownState::Stopped);
        assert_eq!(c.remaining(), 9);
        assert!(c.timer().is_none());
        assert_eq!(c.tick(&mut q), TickOutcome::Ignored);
    }

    #[test]
    fn test_restart_replaces_timer() {
        let (mut c, mut q) = started(10);
        let first = c.timer();
        c.start(&mut q, Duration::from_secs(4), Generation::default().next());
        assert_ne!(first, c.timer());
        assert_eq!(q.len(), 1);
        assert_eq!(c.remaining(), 10);
    }

    #[test]
    fn test_clear_zeroes() {
        let (mut c, mut q) = started(10);
        c.clear(&mut q);
        assert_eq!(c.remaining(), 0);
        assert_eq!(c.percent(), 0);
        assert_eq!(c.display(), EXPIRED_LABEL);
    }
}
