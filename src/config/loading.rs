use std::{fs, io::ErrorKind, path::Path};

use tracing::{debug, info, instrument};

use super::{AgentSettings, ConfigPaths};
use crate::{AgentError, Result};

impl AgentSettings {
    /// Loads settings from the default location, falling back to defaults when the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns error if the config directory cannot be determined or the file is invalid
    pub fn load() -> Result<Self> {
        Self::load_from(&ConfigPaths::main_config()?)
    }

    /// Loads settings from `path`, falling back to defaults when the file does not exist.
    ///
    /// A relative `center.init_config_path` is resolved against the file's directory.
    ///
    /// # Errors
    /// * `AgentError::IoError` - if the file exists but cannot be read
    /// * `AgentError::TomlParseError` - if the file is not valid TOML for these settings
    /// * `AgentError::ConfigValidation` - if a value is out of range
    #[instrument]
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings file at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(AgentError::io(e, path)),
        };

        let mut settings: AgentSettings =
            toml::from_str(&content).map_err(|e| AgentError::toml_parse(e, Some(path)))?;

        if let (Some(init), Some(parent)) = (&settings.center.init_config_path, path.parent()) {
            if init.is_relative() {
                let resolved = parent.join(init);
                debug!("Resolved init config path to {}", resolved.display());
                settings.center.init_config_path = Some(resolved);
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from a TOML string.
    ///
    /// # Errors
    /// Returns error if the TOML is invalid or a value is out of range
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: AgentSettings =
            toml::from_str(content).map_err(|e| AgentError::toml_parse(e, None))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    /// Returns `AgentError::ConfigValidation` naming the offending section
    pub fn validate(&self) -> Result<()> {
        let bootstrap = &self.bootstrap;

        if bootstrap.max_attempts == 0 {
            return Err(AgentError::validation(
                "bootstrap",
                "max_attempts must be at least 1",
            ));
        }

        if bootstrap.initial_backoff_ms > bootstrap.max_backoff_ms {
            return Err(AgentError::validation(
                "bootstrap",
                format!(
                    "initial_backoff_ms ({}) must not exceed max_backoff_ms ({})",
                    bootstrap.initial_backoff_ms, bootstrap.max_backoff_ms
                ),
            ));
        }

        Ok(())
    }
}
