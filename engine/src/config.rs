//! Engine configuration.

use crate::{collate::DEFAULT_LOCALE, debounce::DEFAULT_DEBOUNCE_MS};
use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::TableViewEngine`].
///
/// Deserializes from camelCase JSON; missing fields take their defaults, so
/// `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Quiescence window before a filter change is committed
    pub debounce_ms: u64,
    /// BCP-47 tag used for column collation
    pub locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}
