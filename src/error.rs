//! Centralized error types for tempmail.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the tempmail library.
///
/// Session actions themselves never fail: missing identities and the like are
/// reported to the user as notifications. These variants cover the edges
/// (clipboard, configuration, terminal I/O).
#[derive(Error, Debug)]
pub enum TempMailError {
    /// A clipboard backend refused or failed to store text.
    #[error("Clipboard '{backend}' unavailable: {reason}")]
    Clipboard {
        backend: &'static str,
        reason: String,
    },

    /// A configuration value is out of range or empty.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing to the terminal failed.
    #[error("Terminal error: {0}")]
    Terminal(#[source] std::io::Error),
}

/// Convenience alias for `Result<T, TempMailError>`.
pub type Result<T> = std::result::Result<T, TempMailError>;

impl TempMailError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a `Clipboard` variant for the named backend.
    pub fn clipboard(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::Clipboard {
            backend,
            reason: reason.into(),
        }
    }

    /// Create an `InvalidConfig` variant.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = TempMailError::clipboard("osc52", "not a terminal");
        assert_eq!(e.to_string(), "Clipboard 'osc52' unavailable: not a terminal");

        let e = TempMailError::invalid_config("session.domains", "must not be empty");
        assert!(e.to_string().contains("session.domains"));
    }
}
