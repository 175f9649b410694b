//! The disposable-mailbox session: identity generation, lifetime countdown,
//! simulated arrivals and the controller that ties them together.

pub mod clipboard;
pub mod controller;
pub mod countdown;
pub mod feed;
pub mod generator;
pub mod presenter;
pub mod random;
pub mod scheduler;

use std::time::Duration;

use crate::error::{Result, TempMailError};

// ── Defaults ─────────────────────────────────────────────────────

/// How long an identity lives, in seconds.
pub const LIFETIME_SECS: u32 = 10 * 60;

/// Countdown tick period.
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Period of the simulated-arrival timer.
pub const FEED_PERIOD: Duration = Duration::from_millis(20_000);

/// Chance that a feed tick produces nothing.
pub const FEED_SKIP_PROBABILITY: f64 = 0.5;

/// Length of the random part of an address.
pub const ADDRESS_LOCAL_LEN: usize = 10;

/// Length of generated passwords.
pub const PASSWORD_LEN: usize = 14;

/// Domains addresses are issued under.
pub const DOMAINS: [&str; 3] = ["temp-mail.org", "mail-temp.net", "gettmp.io"];

/// Subjects of simulated messages.
pub const SUBJECTS: [&str; 4] = [
    "Welcome",
    "Verify your account",
    "Your receipt",
    "Hello from Service",
];

/// Symbols mixed into passwords alongside letters and digits.
pub const PASSWORD_SYMBOLS: &str = "!@#$%^&*()-_=+[]{}<>?";

/// Default notification duration.
pub const NOTICE_DURATION: Duration = Duration::from_millis(2200);

/// Duration of the expiry notification.
pub const EXPIRED_NOTICE_DURATION: Duration = Duration::from_millis(3000);

/// Duration of the new-message notification.
pub const ARRIVAL_NOTICE_DURATION: Duration = Duration::from_millis(1400);

/// Tunables for a [`controller::SessionController`].
///
/// Use [`SessionSettings::validate`] before handing hand-built values to the
/// controller; it substitutes the defaults for anything that fails.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub lifetime_secs: u32,
    pub feed_period: Duration,
    pub feed_skip_probability: f64,
    pub domains: Vec<String>,
    pub subjects: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            lifetime_secs: LIFETIME_SECS,
            feed_period: FEED_PERIOD,
            feed_skip_probability: FEED_SKIP_PROBABILITY,
            domains: DOMAINS.iter().map(|d| d.to_string()).collect(),
            subjects: SUBJECTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SessionSettings {
    /// Check that every value is usable: a non-zero lifetime and feed
    /// period, a probability in `0..=1`, and non-empty lists of bare
    /// domains and subjects.
    pub fn validate(&self) -> Result<()> {
        if self.lifetime_secs == 0 {
            return Err(TempMailError::invalid_config(
                "session.lifetime_secs",
                "must be at least 1",
            ));
        }
        if self.feed_period.is_zero() {
            return Err(TempMailError::invalid_config(
                "session.feed_interval_ms",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.feed_skip_probability) {
            return Err(TempMailError::invalid_config(
                "session.feed_skip_probability",
                format!("{} is not between 0 and 1", self.feed_skip_probability),
            ));
        }
        if self.domains.is_empty() {
            return Err(TempMailError::invalid_config(
                "session.domains",
                "must not be empty",
            ));
        }
        if let Some(bad) = self
            .domains
            .iter()
            .find(|d| d.is_empty() || d.contains('@') || d.contains(char::is_whitespace))
        {
            return Err(TempMailError::invalid_config(
                "session.domains",
                format!("'{bad}' is not a bare domain"),
            ));
        }
        if self.subjects.is_empty() {
            return Err(TempMailError::invalid_config(
                "session.subjects",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SessionSettings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_lists_rejected() {
        let mut settings = SessionSettings::default();
        settings.domains.clear();
        assert!(matches!(
            settings.validate(),
            Err(TempMailError::InvalidConfig {
                field: "session.domains",
                ..
            })
        ));

        let mut settings = SessionSettings::default();
        settings.subjects.clear();
        assert!(matches!(
            settings.validate(),
            Err(TempMailError::InvalidConfig {
                field: "session.subjects",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_period_rejected() {
        let mut settings = SessionSettings::default();
        settings.feed_period = Duration::ZERO;
        assert!(settings.validate().is_err());
    }
}
