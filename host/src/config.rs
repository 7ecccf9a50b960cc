//! Configuration management for the host.

use std::env;
use tableview_engine::{EngineConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_LOCALE};

/// Default depth of the command queue in front of the engine task.
pub const DEFAULT_COMMAND_BUFFER: usize = 64;

/// Host configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Filter debounce window in milliseconds
    pub debounce_ms: u64,
    /// BCP-47 locale for column collation
    pub locale: String,
    /// Capacity of the command channel
    pub command_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            locale: DEFAULT_LOCALE.to_string(),
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl Config {
    /// Load configuration from a `.env` file (if present) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    ///
    /// Reads `TABLEVIEW_DEBOUNCE_MS`, `TABLEVIEW_LOCALE` and
    /// `TABLEVIEW_COMMAND_BUFFER`; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let debounce_ms = match lookup("TABLEVIEW_DEBOUNCE_MS") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidDebounce(raw))?,
            None => defaults.debounce_ms,
        };

        let locale = lookup("TABLEVIEW_LOCALE")
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(defaults.locale);

        let command_buffer = match lookup("TABLEVIEW_COMMAND_BUFFER") {
            Some(raw) => match raw.trim().parse() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::InvalidCommandBuffer(raw)),
            },
            None => defaults.command_buffer,
        };

        Ok(Self {
            debounce_ms,
            locale,
            command_buffer,
        })
    }

    /// The part of the configuration the engine itself consumes.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            debounce_ms: self.debounce_ms,
            locale: self.locale.clone(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid TABLEVIEW_DEBOUNCE_MS value: {0}")]
    InvalidDebounce(String),

    #[error("Invalid TABLEVIEW_COMMAND_BUFFER value: {0} (must be a positive integer)")]
    InvalidCommandBuffer(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.debounce_ms, 500);
        assert_eq!(config.locale, "es");
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup(&[
            ("TABLEVIEW_DEBOUNCE_MS", " 250 "),
            ("TABLEVIEW_LOCALE", "en-GB"),
            ("TABLEVIEW_COMMAND_BUFFER", "8"),
        ]))
        .unwrap();

        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.locale, "en-GB");
        assert_eq!(config.command_buffer, 8);
        assert_eq!(config.engine_config().debounce_ms, 250);
    }

    #[test]
    fn blank_locale_falls_back() {
        let config = Config::from_lookup(lookup(&[("TABLEVIEW_LOCALE", "  ")])).unwrap();
        assert_eq!(config.locale, "es");
    }

    #[test]
    fn invalid_values() {
        let err = Config::from_lookup(lookup(&[("TABLEVIEW_DEBOUNCE_MS", "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidDebounce("soon".into()));

        let err = Config::from_lookup(lookup(&[("TABLEVIEW_COMMAND_BUFFER", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidCommandBuffer("0".into()));
    }
}
