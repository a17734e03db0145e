use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Where the initial configuration comes from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Default)]
pub struct CenterSettings {
    /// JSON file served as the initial configuration. Relative paths resolve
    /// against the directory of the settings file.
    #[serde(default)]
    pub init_config_path: Option<PathBuf>,
}
