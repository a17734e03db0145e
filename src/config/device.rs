use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::services::DevMeta;

/// Identity reported to the central authority during bootstrap.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DeviceSettings {
    /// Device kind, e.g. "fridge".
    #[serde(default = "default_device_type")]
    pub device_type: String,

    /// Human-readable device name.
    #[serde(default)]
    pub name: String,

    /// Hardware address of the device.
    #[serde(default)]
    pub mac: String,
}

fn default_device_type() -> String {
    "fridge".to_string()
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            device_type: default_device_type(),
            name: String::new(),
            mac: String::new(),
        }
    }
}

impl From<&DeviceSettings> for DevMeta {
    fn from(settings: &DeviceSettings) -> Self {
        DevMeta {
            device_type: settings.device_type.clone(),
            name: settings.name.clone(),
            mac: settings.mac.clone(),
        }
    }
}
