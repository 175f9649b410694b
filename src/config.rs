//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$TEMPMAIL_CONFIG` (environment variable)
//! 2. `~/.config/tempmail/config.toml` (Linux/macOS)
//!    `%APPDATA%\tempmail\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TempMailError};
use crate::session::{self, SessionSettings};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Display settings.
    pub display: DisplayConfig,
    /// Session lifetime and simulated feed.
    pub session: SessionConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Color theme: "dark" or "light".
    pub theme: String,
    /// Event loop poll interval in milliseconds.
    pub tick_rate_ms: u64,
}

/// Session lifetime and simulated feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Identity lifetime in seconds.
    pub lifetime_secs: u32,
    /// Interval between simulated-arrival ticks, in milliseconds.
    pub feed_interval_ms: u64,
    /// Chance (0.0–1.0) that a feed tick produces nothing.
    pub feed_skip_probability: f64,
    /// Domains to issue addresses under (without `@`).
    pub domains: Vec<String>,
    /// Subjects of simulated messages.
    pub subjects: Vec<String>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: 100,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        let defaults = SessionSettings::default();
        Self {
            lifetime_secs: defaults.lifetime_secs,
            feed_interval_ms: session::FEED_PERIOD.as_millis() as u64,
            feed_skip_probability: defaults.feed_skip_probability,
            domains: defaults.domains,
            subjects: defaults.subjects,
        }
    }
}

impl SessionConfig {
    /// Check ranges and convert into controller settings.
    pub fn to_settings(&self) -> Result<SessionSettings> {
        let settings = SessionSettings {
            lifetime_secs: self.lifetime_secs,
            feed_period: Duration::from_millis(self.feed_interval_ms),
            feed_skip_probability: self.feed_skip_probability,
            domains: self.domains.clone(),
            subjects: self.subjects.clone(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Config {
    /// Validated session settings, or the built-in defaults if the
    /// configured ones are unusable.
    pub fn session_settings(&self) -> SessionSettings {
        match self.session.to_settings() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid session config, using defaults");
                SessionSettings::default()
            }
        }
    }
}

// ── Load ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    match config_file_path() {
        Some(path) if path.exists() => load_config_from(&path),
        _ => Config::default(),
    }
}

/// Load configuration from `path`, falling back to defaults on any error.
pub fn load_config_from(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<Config>(&contents) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "Loaded config");
                cfg
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to parse config, using defaults"
                );
                Config::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to read config file, using defaults"
            );
            Config::default()
        }
    }
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    // 1. Environment variable override
    if let Ok(env_path) = std::env::var("TEMPMAIL_CONFIG") {
        return Some(PathBuf::from(env_path));
    }

    // 2. Standard config directory
    dirs::config_dir().map(|d| d.join("tempmail").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tempmail")
}

/// Name of the log file inside the cache directory.
pub const LOG_FILE_NAME: &str = "tempmail.log";

/// Create the cache directory if needed and return it, for the log file.
pub fn ensure_log_dir(config: &Config) -> Result<PathBuf> {
    let dir = cache_dir(config);
    std::fs::create_dir_all(&dir).map_err(|e| TempMailError::io(&dir, e))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.display.theme, "dark");
        assert_eq!(cfg.session.lifetime_secs, 600);
        assert_eq!(cfg.session.feed_interval_ms, 20_000);
        assert_eq!(cfg.session.domains.len(), 3);
        assert_eq!(cfg.session.subjects.len(), 4);
    }

    #[test]
    fn test_defaults_convert_to_default_settings() {
        let settings = Config::default().session.to_settings().expect("valid");
        assert_eq!(settings, SessionSettings::default());
    }

    #[test]
    fn test_serialize_deserialize_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.display.theme, cfg.display.theme);
        assert_eq!(parsed.session.domains, cfg.session.domains);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let partial = r#"
[display]
theme = "light"

[session]
lifetime_secs = 60
"#;
        let cfg: Config = toml::from_str(partial).expect("parse partial");
        assert_eq!(cfg.display.theme, "light");
        assert_eq!(cfg.session.lifetime_secs, 60);
        // Other fields use defaults
        assert_eq!(cfg.display.tick_rate_ms, 100);
        assert_eq!(cfg.session.feed_skip_probability, 0.5);
    }

    #[test]
    fn test_invalid_session_values() {
        let mut s = SessionConfig::default();
        s.feed_skip_probability = 1.5;
        assert!(matches!(
            s.to_settings(),
            Err(TempMailError::InvalidConfig {
                field: "session.feed_skip_probability",
                ..
            })
        ));

        let mut s = SessionConfig::default();
        s.domains = vec!["@bad.io".to_string()];
        assert!(s.to_settings().is_err());

        let mut s = SessionConfig::default();
        s.subjects.clear();
        assert!(s.to_settings().is_err());

        let mut s = SessionConfig::default();
        s.lifetime_secs = 0;
        assert!(s.to_settings().is_err());
    }

    #[test]
    fn test_invalid_session_falls_back() {
        let mut cfg = Config::default();
        cfg.session.domains.clear();
        assert_eq!(cfg.session_settings(), SessionSettings::default());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ndomains = [\"example.test\"]\nfeed_interval_ms = 5000\n",
        )
        .expect("write");

        let loaded = load_config_from(&path);
        assert_eq!(loaded.session.domains, vec!["example.test".to_string()]);
        assert_eq!(loaded.session.feed_interval_ms, 5000);
        assert_eq!(loaded.session.lifetime_secs, 600);
    }

    #[test]
    fn test_ensure_log_dir_creates_cache_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(dir.path().join("nested").join("cache"));

        let log_dir = ensure_log_dir(&cfg).expect("created");
        assert!(log_dir.is_dir());
        assert_eq!(log_dir, dir.path().join("nested").join("cache"));
    }

    #[test]
    fn test_ensure_log_dir_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "").expect("write");
        let mut cfg = Config::default();
        cfg.general.cache_dir = Some(blocker.join("cache"));

        match ensure_log_dir(&cfg) {
            Err(TempMailError::Io { path, .. }) => assert_eq!(path, blocker.join("cache")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "session = [not toml").expect("write");
        let cfg = load_config_from(&path);
        assert_eq!(cfg.session.lifetime_secs, 600);
    }
}
