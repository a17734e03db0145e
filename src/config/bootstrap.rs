use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Retry behaviour for the initial configuration fetch.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(default)]
pub struct BootstrapSettings {
    /// Total attempts before startup is aborted. Must be at least 1.
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds.
    pub initial_backoff_ms: u64,

    /// Upper bound for the doubling delay, in milliseconds.
    pub max_backoff_ms: u64,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }
}
