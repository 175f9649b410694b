//! Rendering boundary between the session core and whatever displays it.

use std::time::Duration;

use serde::Serialize;

use crate::model::mail::Message;

/// How prominent a notification should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A transient notification ("toast").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub text: String,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
    pub level: NoticeLevel,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u128(d.as_millis())
}

impl Notice {
    pub fn info(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            duration,
            level: NoticeLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            duration,
            level: NoticeLevel::Warning,
        }
    }

    pub fn error(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            duration,
            level: NoticeLevel::Error,
        }
    }
}

/// Render hooks called by [`SessionController`](super::controller::SessionController).
///
/// Implementations only display what they are given. They change session
/// state exclusively through the controller's action methods.
pub trait Presenter {
    /// Show the current address, or the empty placeholder.
    fn render_identity(&mut self, address: Option<&str>);

    /// Show the current password, or the empty placeholder.
    fn render_password(&mut self, password: Option<&str>);

    /// Show the remaining time (`MM:SS` or `Expired`) and the share of the lifetime left.
    fn render_countdown(&mut self, text: &str, percent: u8);

    /// Show the inbox, most recent message first.
    fn render_inbox(&mut self, messages: Vec<Message>);

    /// Open the detail view for one message.
    fn render_message_detail(&mut self, message: &Message);

    /// Close the detail view.
    fn close_message_detail(&mut self);

    /// Show a transient notification.
    fn notify(&mut self, notice: Notice);
}

/// One call into a [`RecordingPresenter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresenterEvent {
    Identity { address: Option<String> },
    Password { password: Option<String> },
    Countdown { text: String, percent: u8 },
    Inbox { messages: Vec<Message> },
    Detail { message: Message },
    CloseDetail,
    Notify { notice: Notice },
}

/// Presenter that keeps every call, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts of all notifications so far.
    pub fn notices(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PresenterEvent::Notify { notice } => Some(notice.text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recent inbox render.
    pub fn last_inbox(&self) -> Option<&[Message]> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Inbox { messages } => Some(messages.as_slice()),
            _ => None,
        })
    }

    /// The most recent countdown render.
    pub fn last_countdown(&self) -> Option<(&str, u8)> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Countdown { text, percent } => Some((text.as_str(), *percent)),
            _ => None,
        })
    }

    /// The most recent identity render.
    pub fn last_identity(&self) -> Option<Option<&str>> {
        self.events.iter().rev().find_map(|e| match e {
            PresenterEvent::Identity { address } => Some(address.as_deref()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn render_identity(&mut self, address: Option<&str>) {
        self.events.push(PresenterEvent::Identity {
            address: address.map(str::to_string),
        });
    }

    fn render_password(&mut self, password: Option<&str>) {
        self.events.push(PresenterEvent::Password {
            password: password.map(str::to_string),
        });
    }

    fn render_countdown(&mut self, text: &str, percent: u8) {
        self.events.push(PresenterEvent::Countdown {
            text: text.to_string(),
            percent,
        });
    }

    fn render_inbox(&mut self, messages: Vec<Message>) {
        self.events.push(PresenterEvent::Inbox { messages });
    }

    fn render_message_detail(&mut self, message: &Message) {
        self.events.push(PresenterEvent::Detail {
            message: message.clone(),
        });
    }

    fn close_message_detail(&mut self) {
        self.events.push(PresenterEvent::CloseDetail);
    }

    fn notify(&mut self, notice: Notice) {
        self.events.push(PresenterEvent::Notify { notice });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_json_uses_millis() {
        let n = Notice::info("hello", Duration::from_millis(2200));
        let json = serde_json::to_value(&n).expect("serialize");
        assert_eq!(json["duration_ms"], 2200);
        assert_eq!(json["level"], "info");
    }

    #[test]
    fn test_recording_accessors() {
        let mut p = RecordingPresenter::new();
        p.render_countdown("10:00", 100);
        p.notify(Notice::warning("careful", Duration::from_secs(1)));
        p.render_countdown("09:59", 100);
        assert_eq!(p.last_countdown(), Some(("09:59", 100)));
        assert_eq!(p.notices(), vec!["careful"]);
        assert!(p.last_inbox().is_none());
    }
}
