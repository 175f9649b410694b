//! Simulated incoming mail.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use super::random::RandomSource;
use super::scheduler::{Generation, Scheduler, TimerHandle, TimerKind, TimerTag};
use crate::model::identity::Identity;
use crate::model::mail::{Inbox, Message};

/// Periodically synthesizes a message for the active identity.
#[derive(Debug, Clone)]
pub struct MessageFeed {
    period: Duration,
    skip_probability: f64,
    subjects: Vec<String>,
    timer: Option<TimerHandle>,
}

impl MessageFeed {
    /// A stopped feed. `subjects` must not be empty.
    pub fn new(period: Duration, skip_probability: f64, subjects: Vec<String>) -> Self {
        Self {
            period,
            skip_probability,
            subjects,
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Handle of the running feed timer, if any.
    pub fn timer(&self) -> Option<TimerHandle> {
        self.timer
    }

    /// Start ticking every period. A running timer is stopped first, so there
    /// is never more than one.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler, now: Duration, generation: Generation) {
        self.stop(scheduler);
        self.timer = Some(scheduler.schedule_repeating(
            now,
            self.period,
            TimerTag {
                kind: TimerKind::Feed,
                generation,
            },
        ));
    }

    /// Stop ticking. Idempotent.
    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(handle) = self.timer.take() {
            scheduler.cancel(handle);
        }
    }

    /// Handle one period. Returns the message that arrived, if any.
    ///
    /// Without an identity this does nothing. Otherwise half the ticks (by
    /// default) are skipped to make arrivals irregular.
    pub fn tick<R: RandomSource + ?Sized>(
        &self,
        rng: &mut R,
        identity: Option<&Identity>,
        inbox: &mut Inbox,
        now: DateTime<Utc>,
    ) -> Option<Message> {
        let identity = identity?;
        if rng.unit() < self.skip_probability {
            return None;
        }

        let subject = self.subjects[rng.index(self.subjects.len())].clone();
        let time_label = now.with_timezone(&Local).format("%H:%M:%S").to_string();
        let body = format!(
            "{subject} — This is a simulated message for {}. Time: {time_label}",
            identity.address
        );
        let message = Message {
            id: inbox.next_id(),
            subject,
            body,
            received_at: now,
            time_label,
        };
        inbox.push(message.clone());
        Some(message)
    }
}
