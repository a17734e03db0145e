//! Settings of the agent process itself.
//!
//! These are static, read once at startup from a TOML file. The device
//! configuration received from the central authority lives in
//! [`config_store`](crate::config_store) instead.

mod bootstrap;
mod center;
mod device;
mod general;
mod loading;
mod paths;

#[cfg(test)]
mod tests;

pub use bootstrap::BootstrapSettings;
pub use center::CenterSettings;
pub use device::DeviceSettings;
pub use general::{GeneralSettings, LogLevel};
pub use paths::ConfigPaths;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Main settings structure for the agent.
///
/// Every section is optional in the file and falls back to its defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
pub struct AgentSettings {
    /// Logging settings.
    #[serde(default)]
    pub general: GeneralSettings,

    /// Identity reported to the central authority.
    #[serde(default)]
    pub device: DeviceSettings,

    /// Source of the initial configuration.
    #[serde(default)]
    pub center: CenterSettings,

    /// Retry behaviour for the initial fetch.
    #[serde(default)]
    pub bootstrap: BootstrapSettings,
}
