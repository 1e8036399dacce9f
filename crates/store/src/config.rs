//! External store configuration.

use lead_core::limits::DEFAULT_PERSIST_TIMEOUT_SECS;
use serde::{Deserialize, Serialize};

/// REST store configuration.
///
/// Persistence is enabled only when both `url` and `api_key` are non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestStoreConfig {
    /// Base URL of the REST backend (e.g. "https://xyz.example.co")
    #[serde(default)]
    pub url: String,
    /// Key sent as both `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
    /// Table receiving one row per submission
    #[serde(default = "default_table")]
    pub table: String,
    /// Write timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "submissions".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_PERSIST_TIMEOUT_SECS
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            api_key: String::new(),
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RestStoreConfig {
    /// Whether external persistence should be attempted.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.api_key.trim().is_empty()
    }

    /// Insert endpoint for the configured table.
    pub fn insert_url(&self) -> String {
        format!("{}/rest/v1/{}", self.url.trim_end_matches('/'), self.table)
    }
}
