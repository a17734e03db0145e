//! JSON schema of the agent settings file.

use schemars::schema_for;
use serde_json::Value;

use crate::config::AgentSettings;

/// Returns the JSON schema describing `config.toml`.
///
/// # Errors
/// Returns error if the schema cannot be converted to JSON
pub fn settings_schema() -> Result<Value, serde_json::Error> {
    serde_json::to_value(schema_for!(AgentSettings))
}

/// Renders [`settings_schema`] as pretty-printed JSON.
///
/// # Errors
/// Returns error if the schema cannot be serialized
pub fn settings_schema_pretty() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&settings_schema()?)
}
