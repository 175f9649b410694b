//! Simulated messages and the inbox that holds them.

use chrono::{DateTime, Utc};

/// A single synthesized message.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Sequence number within the current session (1, 2, 3, …).
    /// Used by the UI to refer back to a message.
    pub id: u64,

    /// Subject line, drawn from the feed vocabulary.
    pub subject: String,

    /// Plain-text body. Mentions the subject, the address and the arrival time.
    pub body: String,

    /// Arrival instant.
    pub received_at: DateTime<Utc>,

    /// Arrival time as shown in the list and the detail view (`HH:MM:SS`, local time).
    pub time_label: String,
}

impl Message {
    /// First `max_chars` characters of the body, for list snippets.
    pub fn snippet(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }
}

/// Arrival-ordered message store for one identity.
///
/// Messages are kept in the order they arrived; [`Inbox::newest_first`] gives
/// the display order.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    messages: Vec<Message>,
    next_id: u64,
}

impl Inbox {
    /// Create an empty inbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages received.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no message has arrived yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop every message and restart id numbering.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.next_id = 0;
    }

    /// Reserve the id for the next message.
    pub fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Append a message at the end (newest position).
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Messages in arrival order.
    pub fn arrival_order(&self) -> &[Message] {
        &self.messages
    }

    /// Snapshot of the messages, most recent first.
    pub fn newest_first(&self) -> Vec<Message> {
        self.messages.iter().rev().cloned().collect()
    }

    /// Look up a message by id.
    pub fn get(&self, id: u64) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }
}
