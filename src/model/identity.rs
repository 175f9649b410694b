//! The active mailbox credential pair.

use chrono::{DateTime, Utc};

/// A generated throwaway mailbox.
///
/// Both fields are fixed at creation; a refresh replaces the whole value
/// rather than editing it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Identity {
    /// Full address, `local@domain`.
    pub address: String,

    /// Password generated alongside the address.
    pub password: String,

    /// Wall-clock instant of generation.
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// The domain the address was issued under, without the `@`.
    pub fn domain(&self) -> &str {
        self.address
            .split_once('@')
            .map(|(_, domain)| domain)
            .unwrap_or("")
    }
}
